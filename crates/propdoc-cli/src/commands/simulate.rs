//! Simulate command - print a synthetic extraction.

use chrono::{Local, NaiveDate};
use clap::Args;

use propdoc_core::{DocumentType, ExtractionResponse, SimulationGenerator};

use super::{OutputFormat, format_text, load_config};

/// Arguments for the simulate command.
#[derive(Args)]
pub struct SimulateArgs {
    /// Document type
    #[arg(short = 't', long = "type")]
    document_type: DocumentType,

    /// Random seed (default: simulation.seed from config, else random)
    #[arg(long)]
    seed: Option<u64>,

    /// Reference date (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show confidence scores (text output)
    #[arg(long)]
    show_confidence: bool,
}

pub fn run(args: SimulateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let seed = args.seed.or(config.simulation.seed);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let simulated = SimulationGenerator::from_seed(seed, today).generate(args.document_type, None);

    let response = ExtractionResponse {
        success: true,
        extracted_data: simulated.data,
        confidence_scores: simulated.confidence_scores,
        fallback: Some(true),
    };

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)?,
        OutputFormat::Text => format_text(
            &response.extracted_data,
            args.show_confidence.then_some(&response.confidence_scores),
            true,
        )?,
    };
    println!("{}", output);

    Ok(())
}
