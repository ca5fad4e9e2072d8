//! HTTP client for the document intelligence REST API.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::error::GatewayError;
use crate::models::config::ServiceConfig;
use crate::models::{MimeType, RawDocument};

use super::{DocumentIntelligence, ProcessRequest, ProcessResponse, RawDocumentPayload};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Posts documents to a processor's `:process` endpoint.
pub struct HttpGateway {
    config: ServiceConfig,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Create a gateway for `config`; fails when credentials are missing.
    pub fn new(config: ServiceConfig) -> Result<Self, GatewayError> {
        let missing = config.missing_settings();
        if !missing.is_empty() {
            return Err(GatewayError::NotConfigured(missing.join(", ")));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[async_trait]
impl DocumentIntelligence for HttpGateway {
    async fn process(&self, content: &[u8], mime_type: MimeType) -> Result<RawDocument, GatewayError> {
        let url = self.config.process_url();
        debug!("Sending {} bytes ({}) to {}", content.len(), mime_type.as_str(), url);

        let request = ProcessRequest {
            raw_document: RawDocumentPayload {
                content: STANDARD.encode(content),
                mime_type: mime_type.as_str(),
            },
        };

        let mut builder = self.client.post(&url).json(&request);
        if let Some(api_key) = self.config.api_key.as_deref() {
            builder = builder.header(API_KEY_HEADER, api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout(self.config.timeout())
            } else {
                GatewayError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Document intelligence service returned {}", status);
            return Err(GatewayError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let body: ProcessResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        debug!(
            "Received {} characters and {} entities",
            body.document.text.len(),
            body.document.entities.len()
        );

        Ok(body.document)
    }
}
