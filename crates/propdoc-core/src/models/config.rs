//! Configuration structures for the extraction pipeline.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration for the propdoc pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropdocConfig {
    /// Document intelligence service configuration.
    pub service: ServiceConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Simulated fallback configuration.
    pub simulation: SimulationConfig,
}

/// Document intelligence service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the service.
    pub endpoint: String,

    /// Cloud project identifier.
    pub project_id: String,

    /// Processor location (e.g. "us", "eu").
    pub location: String,

    /// Processor identifier.
    pub processor_id: Option<String>,

    /// API key sent with each request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Upper bound for a single processing call, in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://us-documentai.googleapis.com".to_string(),
            project_id: "propdoc".to_string(),
            location: "us".to_string(),
            processor_id: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl ServiceConfig {
    /// Whether both the API key and processor identifier are set.
    pub fn is_configured(&self) -> bool {
        self.missing_settings().is_empty()
    }

    /// Names of required settings that are absent or blank.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let blank = |value: &Option<String>| value.as_deref().is_none_or(|v| v.trim().is_empty());

        let mut missing = Vec::new();
        if blank(&self.api_key) {
            missing.push("api_key");
        }
        if blank(&self.processor_id) {
            missing.push("processor_id");
        }
        missing
    }

    /// Processor-specific processing endpoint.
    pub fn process_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/processors/{}:process",
            self.endpoint.trim_end_matches('/'),
            self.project_id,
            self.location,
            self.processor_id.as_deref().unwrap_or_default()
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Fill fields missing from entity extraction by scanning the document text.
    pub regex_fallback: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            regex_fallback: true,
        }
    }
}

/// Simulated fallback configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed seed for reproducible synthetic data. Unseeded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl PropdocConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `DOCUMENT_AI_API_KEY`
    /// - `DOCUMENT_AI_PROCESSOR_ID`
    /// - `DOCUMENT_AI_PROJECT_ID`
    /// - `DOCUMENT_AI_LOCATION`
    /// - `DOCUMENT_AI_ENDPOINT`
    /// - `PROPDOC_SIMULATION_SEED`
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("DOCUMENT_AI_API_KEY") {
            self.service.api_key = Some(key);
        }
        if let Some(id) = non_empty("DOCUMENT_AI_PROCESSOR_ID") {
            self.service.processor_id = Some(id);
        }
        if let Some(project) = non_empty("DOCUMENT_AI_PROJECT_ID") {
            self.service.project_id = project;
        }
        if let Some(location) = non_empty("DOCUMENT_AI_LOCATION") {
            self.service.location = location;
        }
        if let Some(endpoint) = non_empty("DOCUMENT_AI_ENDPOINT") {
            self.service.endpoint = endpoint;
        }
        if let Some(seed) = non_empty("PROPDOC_SIMULATION_SEED").and_then(|s| s.trim().parse().ok()) {
            self.simulation.seed = Some(seed);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_is_not_configured() {
        let config = PropdocConfig::default();
        assert!(!config.service.is_configured());
        assert_eq!(config.service.missing_settings(), vec!["api_key", "processor_id"]);
        assert!(config.extraction.regex_fallback);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DOCUMENT_AI_API_KEY", "secret"),
            ("DOCUMENT_AI_PROCESSOR_ID", "abc123"),
            ("DOCUMENT_AI_LOCATION", "eu"),
            ("PROPDOC_SIMULATION_SEED", "42"),
        ]);

        let config = PropdocConfig::default()
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert!(config.service.is_configured());
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(
            config.service.process_url(),
            "https://us-documentai.googleapis.com/v1/projects/propdoc/locations/eu/processors/abc123:process"
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PropdocConfig =
            serde_json::from_str(r#"{ "service": { "timeout_secs": 5 } }"#).unwrap();
        assert_eq!(config.service.timeout(), Duration::from_secs(5));
        assert_eq!(config.service.location, "us");
        assert!(config.extraction.regex_fallback);
    }
}
