//! Error types for the propdoc-core library.

use std::time::Duration;

use thiserror::Error;

/// Main error type for the propdoc library.
#[derive(Error, Debug)]
pub enum PropdocError {
    /// The extraction request is missing required identifiers.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error (missing service credentials and similar).
    #[error("configuration error: {0}")]
    Config(String),

    /// Document (or its content) was not found.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Document intelligence service error.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Persistence collaborator error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PropdocError {
    /// HTTP-equivalent status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::NotFound(_) => 404,
            _ => 500,
        }
    }

    /// Whether the caller may retry the same request and expect a different outcome.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidRequest(_) | Self::Config(_) | Self::NotFound(_) => false,
            Self::Gateway(_) | Self::Storage(_) | Self::Io(_) => true,
            Self::Extraction(_) | Self::Json(_) => false,
        }
    }

    /// Whether the orchestrator absorbs this error through the simulation fallback.
    pub fn triggers_fallback(&self) -> bool {
        matches!(self, Self::Gateway(_) | Self::Extraction(_))
    }
}

/// Errors from the external document intelligence service.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// The call did not complete within the configured bound.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The gateway is not usable with the current configuration.
    #[error("gateway not configured: {0}")]
    NotConfigured(String),
}

/// Errors raised while turning a raw document into typed fields.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A normalized date on an entity is not a valid calendar date.
    #[error("invalid date for {field}: {value}")]
    InvalidDate { field: String, value: String },

    /// Date arithmetic left the representable range.
    #[error("date out of range for {0}")]
    DateOutOfRange(String),

    /// Amount arithmetic overflowed the decimal range.
    #[error("amount out of range for {0}")]
    AmountOutOfRange(String),
}

/// Errors from the storage and persistence collaborators.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A lock guarding in-memory state was poisoned.
    #[error("store lock poisoned")]
    Poisoned,

    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for the propdoc library.
pub type Result<T> = std::result::Result<T, PropdocError>;
