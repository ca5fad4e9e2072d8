//! CLI command implementations.

pub mod batch;
pub mod config;
pub mod parse;
pub mod process;
pub mod simulate;

use std::path::{Path, PathBuf};

use propdoc_core::models::ConfidenceScores;
use propdoc_core::{ExtractedFields, PropdocConfig};
use tracing::debug;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("propdoc")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
/// Environment overrides are applied last.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PropdocConfig> {
    let config = match config_path {
        Some(path) => PropdocConfig::from_file(Path::new(path))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Loading configuration from {}", path.display());
                PropdocConfig::from_file(&path)?
            } else {
                PropdocConfig::default()
            }
        }
    };

    Ok(config.with_env_overrides())
}

/// Render fields one per line in schema order.
pub fn format_text(
    fields: &ExtractedFields,
    confidence: Option<&ConfidenceScores>,
    fallback: bool,
) -> anyhow::Result<String> {
    let document_type = fields.document_type();
    let json = serde_json::to_value(fields)?;

    let mut output = format!("Document type: {}\n", document_type);
    if fallback {
        output.push_str("Source: simulated data\n");
    }
    output.push('\n');

    for spec in document_type.profile().fields {
        let Some(value) = json.get(spec.name) else {
            continue;
        };

        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => format!("{} item(s)", items.len()),
            other => other.to_string(),
        };

        match confidence.and_then(|c| c.get(spec.name)) {
            Some(score) => output.push_str(&format!(
                "  {:<20} {:<36} ({:.0}%)\n",
                spec.name,
                rendered,
                score * 100.0
            )),
            None => output.push_str(&format!("  {:<20} {}\n", spec.name, rendered)),
        }
    }

    Ok(output)
}

/// Mean of all confidence scores, zero for an empty map.
pub fn mean_confidence(scores: &ConfidenceScores) -> f32 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.values().sum::<f32>() / scores.len() as f32
}
