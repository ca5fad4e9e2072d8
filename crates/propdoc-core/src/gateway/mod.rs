//! Client side of the external document intelligence service.
//!
//! [`DocumentIntelligence`] is the seam the pipeline calls through; [`HttpGateway`] is the
//! production implementation (behind the `http` feature).

#[cfg(feature = "http")]
mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::models::{MimeType, RawDocument};

#[cfg(feature = "http")]
pub use http::HttpGateway;

/// Turns document bytes into text and typed entities.
#[async_trait]
pub trait DocumentIntelligence: Send + Sync {
    async fn process(&self, content: &[u8], mime_type: MimeType) -> Result<RawDocument, GatewayError>;
}

/// Request body for the `:process` endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest<'a> {
    pub raw_document: RawDocumentPayload<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocumentPayload<'a> {
    /// Base64 encoded document bytes.
    pub content: String,
    pub mime_type: &'a str,
}

/// Response body of the `:process` endpoint.
#[derive(Debug, Deserialize)]
pub struct ProcessResponse {
    pub document: RawDocument,
}

/// Decode a saved service response.
///
/// Accepts the full `{"document": {...}}` envelope or a bare document.
pub fn decode_document(body: &str) -> Result<RawDocument, GatewayError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| GatewayError::Decode(e.to_string()))?;

    let document = match value {
        serde_json::Value::Object(mut map) if map.contains_key("document") => map
            .remove("document")
            .unwrap_or(serde_json::Value::Null),
        other => other,
    };

    serde_json::from_value(document).map_err(|e| GatewayError::Decode(e.to_string()))
}
