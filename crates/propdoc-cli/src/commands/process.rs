//! Process command - extract fields from a single property document.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use propdoc_core::{
    DocumentType, ExtractionPipeline, ExtractionRequest, GatewayError, HttpGateway, MemoryStore,
    StoredDocument,
};

use super::{OutputFormat, format_text, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Document type
    #[arg(short = 't', long = "type")]
    document_type: DocumentType,

    /// Document identifier (default: file stem)
    #[arg(long)]
    document_id: Option<String>,

    /// Property the document belongs to
    #[arg(long, default_value = "local")]
    property_id: String,

    /// User requesting the extraction
    #[arg(long, default_value = "cli")]
    user_id: String,

    /// Reference date for date defaults (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction confidence scores
    #[arg(long)]
    show_confidence: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let gateway = match HttpGateway::new(config.service.clone()) {
        Ok(gateway) => gateway,
        Err(GatewayError::NotConfigured(missing)) => anyhow::bail!(
            "Document intelligence service not configured ({}). Run 'propdoc config set service.api_key <KEY>' or set DOCUMENT_AI_API_KEY.",
            missing
        ),
        Err(e) => return Err(e.into()),
    };

    let file_name = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();
    let document_id = args.document_id.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string()
    });

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Reading document...");

    let content = fs::read(&args.input)?;
    let store = Arc::new(MemoryStore::new().with_document(StoredDocument::new(
        document_id.as_str(),
        args.property_id.as_str(),
        file_name,
        args.document_type,
        content,
    ))?);

    let mut pipeline = ExtractionPipeline::new(config, Arc::new(gateway), store.clone(), store);
    if let Some(today) = args.today {
        pipeline = pipeline.with_today(today);
    }

    pb.set_message("Extracting fields...");
    let request = ExtractionRequest::new(document_id, args.property_id, args.user_id);
    let response = pipeline.handle(&request).await;
    pb.finish_and_clear();

    let response = match response {
        Ok(response) => response,
        Err(e) => anyhow::bail!("Extraction failed ({}): {}", e.status, e.error),
    };

    let fallback = response.fallback.unwrap_or(false);
    if fallback {
        eprintln!(
            "{} Document intelligence unavailable, returning simulated data",
            style("⚠").yellow()
        );
    }

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)?,
        OutputFormat::Text => format_text(
            &response.extracted_data,
            args.show_confidence.then_some(&response.confidence_scores),
            fallback,
        )?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        println!(
            "{} Mean confidence: {:.1}%",
            style("ℹ").blue(),
            super::mean_confidence(&response.confidence_scores) * 100.0
        );
        println!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            start.elapsed().as_millis()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
