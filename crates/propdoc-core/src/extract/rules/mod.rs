//! Rule-based field extractors over document text.
//!
//! These run independently of the intelligence service and only fill fields that entity
//! extraction left empty.

pub mod amounts;
pub mod compliance;
pub mod dates;
pub mod lease;
pub mod patterns;
pub mod service_charge;
pub mod utility;

pub use amounts::{AmountExtractor, max_amount, parse_amount};
pub use compliance::ComplianceHints;
pub use dates::{DateExtractor, DateSpan, date_span};
pub use lease::LeaseHints;
pub use service_charge::ServiceChargeHints;
pub use utility::UtilityHints;

use crate::models::DocumentType;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Extract all occurrences of the field, in text order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value matched in the source text.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Partial field set recovered from text, per document type.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackFields {
    Utility(UtilityHints),
    Lease(LeaseHints),
    ServiceCharge(ServiceChargeHints),
    Compliance(ComplianceHints),
}

/// Scan `text` with the rule set registered for `document_type`.
pub fn scan(text: &str, document_type: DocumentType) -> FallbackFields {
    (document_type.profile().scan)(text)
}

/// First capture group of `pattern`, trimmed, when non-empty.
pub(crate) fn capture(pattern: &regex::Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Whether the lower-cased text contains any of the keywords.
pub(crate) fn contains_any(lower_text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower_text.contains(k))
}
