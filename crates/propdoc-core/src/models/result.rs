//! Requests, results and persisted records of the extraction pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fields::{ConfidenceScores, ExtractedFields};
use crate::error::PropdocError;

/// Extraction request received at the orchestration boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub property_id: String,
    #[serde(default)]
    pub user_id: String,
}

impl ExtractionRequest {
    pub fn new(
        document_id: impl Into<String>,
        property_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            property_id: property_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Names of identifiers that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("documentId", &self.document_id),
            ("propertyId", &self.property_id),
            ("userId", &self.user_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Lifecycle of one extraction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// One status row, written at each state transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    pub document_id: String,
    pub status: ExtractionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl StatusRecord {
    pub fn new(document_id: impl Into<String>, status: ExtractionStatus) -> Self {
        Self {
            document_id: document_id.into(),
            status,
            message: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Final result of one extraction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub document_id: String,
    pub data: ExtractedFields,
    pub confidence_scores: ConfidenceScores,
    pub is_fallback_data: bool,
}

/// Persisted extraction record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRecord {
    pub document_id: String,
    pub extraction_status: ExtractionStatus,
    pub extraction_date: DateTime<Utc>,
    pub extracted_data: serde_json::Value,
    pub confidence_scores: serde_json::Value,
    pub is_fallback_data: bool,
}

impl ExtractionRecord {
    /// Build the completed record for a result.
    pub fn completed(result: &ExtractionResult) -> Result<Self, serde_json::Error> {
        Ok(Self {
            document_id: result.document_id.clone(),
            extraction_status: ExtractionStatus::Completed,
            extraction_date: Utc::now(),
            extracted_data: serde_json::to_value(&result.data)?,
            confidence_scores: serde_json::to_value(&result.confidence_scores)?,
            is_fallback_data: result.is_fallback_data,
        })
    }
}

/// Successful response returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    pub success: bool,
    pub extracted_data: ExtractedFields,
    pub confidence_scores: ConfidenceScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

impl From<ExtractionResult> for ExtractionResponse {
    fn from(result: ExtractionResult) -> Self {
        Self {
            success: true,
            extracted_data: result.data,
            confidence_scores: result.confidence_scores,
            fallback: result.is_fallback_data.then_some(true),
        }
    }
}

/// Error response returned to the caller on hard failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Whether the same request may succeed later; `false` for missing configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,

    /// HTTP-equivalent status code.
    #[serde(skip)]
    pub status: u16,
}

impl From<&PropdocError> for ErrorResponse {
    fn from(err: &PropdocError) -> Self {
        Self {
            error: err.to_string(),
            retryable: Some(err.is_retryable()),
            status: err.status_code(),
        }
    }
}
