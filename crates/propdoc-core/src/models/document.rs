//! Document types and the raw document returned by the intelligence service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of property document being extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    /// Utility bill (electricity, gas, water).
    Utility,
    /// Lease agreement.
    Lease,
    /// Service-charge budget.
    ServiceCharge,
    /// Compliance certificate (fire safety, EPC, gas safety...).
    Compliance,
}

impl DocumentType {
    /// All document types, in registry order.
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Utility,
        DocumentType::Lease,
        DocumentType::ServiceCharge,
        DocumentType::Compliance,
    ];

    /// Canonical string tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utility => "utility",
            Self::Lease => "lease",
            Self::ServiceCharge => "service-charge",
            Self::Compliance => "compliance",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utility" => Ok(Self::Utility),
            "lease" => Ok(Self::Lease),
            "service-charge" | "service_charge" | "servicecharge" => Ok(Self::ServiceCharge),
            "compliance" => Ok(Self::Compliance),
            other => Err(format!("unknown document type: {other}")),
        }
    }
}

/// Content type sent to the document intelligence service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MimeType {
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl MimeType {
    /// Select the MIME type from a file name's extension.
    ///
    /// `.jpg` and `.jpeg` map to JPEG; everything else is sent as PDF.
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            _ => Self::Pdf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Document as returned by the intelligence service: full text plus recognized entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// Full text of the document.
    #[serde(default)]
    pub text: String,

    /// Recognized entities, unordered, possibly with duplicate types.
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl RawDocument {
    pub fn new(text: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }

    /// Document with text only (no entities).
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }
}

/// A typed span of recognized text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Domain-specific tag, e.g. `invoice_date`.
    #[serde(rename = "type", default)]
    pub entity_type: String,

    /// Text as it appears in the document.
    #[serde(default)]
    pub mention_text: String,

    /// Recognition confidence (0.0 - 1.0).
    #[serde(default)]
    pub confidence: f32,

    /// Structured interpretation of the mention, when the service provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_value: Option<NormalizedValue>,
}

impl Entity {
    pub fn new(entity_type: impl Into<String>, mention_text: impl Into<String>, confidence: f32) -> Self {
        Self {
            entity_type: entity_type.into(),
            mention_text: mention_text.into(),
            confidence,
            normalized_value: None,
        }
    }

    /// Attach a normalized date value.
    pub fn with_date(mut self, year: i32, month: u32, day: u32) -> Self {
        self.normalized_value = Some(NormalizedValue {
            text: None,
            date_value: Some(DateValue {
                year: Some(year),
                month: Some(month),
                day: Some(day),
            }),
        });
        self
    }
}

/// Normalized entity value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_value: Option<DateValue>,
}

/// Decomposed date; month and day may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}
