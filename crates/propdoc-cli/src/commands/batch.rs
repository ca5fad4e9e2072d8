//! Batch processing command for multiple property documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use propdoc_core::{
    DocumentType, ExtractionPipeline, ExtractionRequest, ExtractionResponse, GatewayError,
    HttpGateway, MemoryStore, StoredDocument,
};

use super::{OutputFormat, format_text, load_config, mean_confidence};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Document type shared by all matched files
    #[arg(short = 't', long = "type")]
    document_type: DocumentType,

    /// Property the documents belong to
    #[arg(long, default_value = "local")]
    property_id: String,

    /// User requesting the extractions
    #[arg(long, default_value = "cli")]
    user_id: String,

    /// Reference date for date defaults (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    response: Option<ExtractionResponse>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "jpg" | "jpeg")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let gateway = match HttpGateway::new(config.service.clone()) {
        Ok(gateway) => gateway,
        Err(GatewayError::NotConfigured(missing)) => anyhow::bail!(
            "Document intelligence service not configured ({}). Run 'propdoc config set service.api_key <KEY>' or set DOCUMENT_AI_API_KEY.",
            missing
        ),
        Err(e) => return Err(e.into()),
    };

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let store = Arc::new(MemoryStore::new());
    let mut pipeline =
        ExtractionPipeline::new(config, Arc::new(gateway), store.clone(), store.clone());
    if let Some(today) = args.today {
        pipeline = pipeline.with_today(today);
    }

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &args, &pipeline, &store).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => results.push(ProcessResult {
                path,
                response: Some(response),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        response: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    overall_pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.response.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let simulated = successful
        .iter()
        .filter(|r| r.response.as_ref().is_some_and(|resp| resp.fallback == Some(true)))
        .count();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            let Some(response) = &result.response else {
                continue;
            };
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            let content = match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(response)?,
                OutputFormat::Text => format_text(
                    &response.extracted_data,
                    Some(&response.confidence_scores),
                    response.fallback.unwrap_or(false),
                )?,
            };

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, args.document_type, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} simulated), {} failed",
        style(successful.len()).green(),
        style(simulated).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

async fn process_single_file(
    path: &Path,
    args: &BatchArgs,
    pipeline: &ExtractionPipeline,
    store: &MemoryStore,
) -> anyhow::Result<ExtractionResponse> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();
    // Full path keeps ids unique across directories matched by one pattern.
    let document_id = path.display().to_string();

    let content = fs::read(path)?;
    store.insert_document(StoredDocument::new(
        document_id.as_str(),
        args.property_id.as_str(),
        file_name,
        args.document_type,
        content,
    ))?;

    let request = ExtractionRequest::new(document_id, args.property_id.as_str(), args.user_id.as_str());
    pipeline
        .handle(&request)
        .await
        .map_err(|e| anyhow::anyhow!("{} ({})", e.error, e.status))
}

fn write_summary(
    path: &Path,
    document_type: DocumentType,
    results: &[ProcessResult],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "document_type",
        "fallback",
        "mean_confidence",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(response) = &result.response {
            wtr.write_record([
                filename,
                "success",
                document_type.as_str(),
                &response.fallback.unwrap_or(false).to_string(),
                &format!("{:.2}", mean_confidence(&response.confidence_scores)),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                document_type.as_str(),
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
