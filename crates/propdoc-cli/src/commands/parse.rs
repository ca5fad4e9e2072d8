//! Parse command - run the field parser over a saved service response.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use tracing::info;

use propdoc_core::{DocumentType, ExtractionResponse, ParseContext, decode_document, score};

use super::{OutputFormat, format_text, load_config};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Saved service response (JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Document type
    #[arg(short = 't', long = "type")]
    document_type: DocumentType,

    /// Reference date for date defaults (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Disable text heuristics for fields without entities
    #[arg(long)]
    no_regex: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction confidence scores (text output)
    #[arg(long)]
    show_confidence: bool,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let body = fs::read_to_string(&args.input)?;
    let document = decode_document(&body)?;
    info!(
        "Parsing {} with {} entities as {}",
        args.input.display(),
        document.entities.len(),
        args.document_type
    );

    let ctx = ParseContext::new(args.today.unwrap_or_else(|| Local::now().date_naive()))
        .with_regex_fallback(config.extraction.regex_fallback && !args.no_regex);

    let profile = args.document_type.profile();
    let data = (profile.parse)(&document, &ctx)?;
    let confidence_scores = score(&document, profile.fields);

    let missing = data.missing_fields();
    if !missing.is_empty() {
        eprintln!(
            "{} Incomplete fields: {}",
            style("⚠").yellow(),
            missing.join(", ")
        );
    }

    let response = ExtractionResponse {
        success: true,
        extracted_data: data,
        confidence_scores,
        fallback: None,
    };

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)?,
        OutputFormat::Text => format_text(
            &response.extracted_data,
            args.show_confidence.then_some(&response.confidence_scores),
            false,
        )?,
    };
    println!("{}", output);

    Ok(())
}
