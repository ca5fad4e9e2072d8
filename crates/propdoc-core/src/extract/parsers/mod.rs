//! Type-specific parsers.
//!
//! Every parser resolves each field through three tiers, in order: entity extraction, regex
//! fallback over the document text, then a documented default. The result never has an empty
//! required field.

pub mod compliance;
pub mod lease;
pub mod service_charge;
pub mod utility;

use chrono::{Local, Months, NaiveDate};
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::{DocumentType, ExtractedFields, RawDocument};

/// Inputs shared by all parsers besides the document itself.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext {
    /// Reference date for date defaults.
    pub today: NaiveDate,
    /// Whether the regex tier runs.
    pub regex_fallback: bool,
}

impl ParseContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            regex_fallback: true,
        }
    }

    pub fn with_regex_fallback(mut self, enabled: bool) -> Self {
        self.regex_fallback = enabled;
        self
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

/// Parse `document` with the parser registered for `document_type`.
pub fn parse(
    document: &RawDocument,
    document_type: DocumentType,
    ctx: &ParseContext,
) -> Result<ExtractedFields, ExtractionError> {
    (document_type.profile().parse)(document, ctx)
}

/// Which tier supplied a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Entity,
    Regex,
    Default,
}

/// Applies the entity → regex → default policy and counts where values came from.
#[derive(Debug, Default)]
pub(crate) struct FieldResolver {
    entity: usize,
    regex: usize,
    default: usize,
}

impl FieldResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn resolve<T>(
        &mut self,
        entity: Option<T>,
        regex: Option<T>,
        default: impl FnOnce() -> T,
    ) -> T {
        self.resolve_tier(entity, regex, default).0
    }

    pub(crate) fn resolve_tier<T>(
        &mut self,
        entity: Option<T>,
        regex: Option<T>,
        default: impl FnOnce() -> T,
    ) -> (T, Tier) {
        if let Some(value) = entity {
            self.entity += 1;
            (value, Tier::Entity)
        } else if let Some(value) = regex {
            self.regex += 1;
            (value, Tier::Regex)
        } else {
            self.default += 1;
            (default(), Tier::Default)
        }
    }

    /// Like [`resolve`](Self::resolve) with a fallible default.
    pub(crate) fn try_resolve<T, E>(
        &mut self,
        entity: Option<T>,
        regex: Option<T>,
        default: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        match (entity, regex) {
            (Some(value), _) => {
                self.entity += 1;
                Ok(value)
            }
            (None, Some(value)) => {
                self.regex += 1;
                Ok(value)
            }
            (None, None) => {
                self.default += 1;
                default()
            }
        }
    }

    pub(crate) fn finish(&self, document_type: DocumentType) {
        debug!(
            "Parsed {} document: {} fields from entities, {} from text, {} defaulted",
            document_type, self.entity, self.regex, self.default
        );
    }
}

/// `Some` when the string has content.
pub(crate) fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == s.len() {
        Some(s)
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn add_months(
    date: NaiveDate,
    months: u32,
    field: &str,
) -> Result<NaiveDate, ExtractionError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ExtractionError::DateOutOfRange(field.to_string()))
}

pub(crate) fn sub_months(
    date: NaiveDate,
    months: u32,
    field: &str,
) -> Result<NaiveDate, ExtractionError> {
    date.checked_sub_months(Months::new(months))
        .ok_or_else(|| ExtractionError::DateOutOfRange(field.to_string()))
}

/// Interpret a yes/no style entity label.
pub(crate) fn parse_flag(label: &str) -> Option<bool> {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }

    const NEGATIVE_WORDS: [&str; 4] = ["no", "none", "false", "n/a"];
    const NEGATIVE_PREFIXES: [&str; 5] = ["non", "not ", "fail", "unsatisf", "absent"];
    const POSITIVE: [&str; 6] = ["yes", "true", "pass", "satisf", "compliant", "present"];

    if NEGATIVE_WORDS.contains(&label.as_str())
        || NEGATIVE_PREFIXES.iter().any(|p| label.starts_with(p))
    {
        Some(false)
    } else if POSITIVE.iter().any(|k| label.contains(k)) {
        Some(true)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_prefers_entity_then_regex() {
        let mut resolver = FieldResolver::new();
        assert_eq!(resolver.resolve_tier(Some(1), Some(2), || 3), (1, Tier::Entity));
        assert_eq!(resolver.resolve_tier(None, Some(2), || 3), (2, Tier::Regex));
        assert_eq!(resolver.resolve_tier(None::<i32>, None, || 3), (3, Tier::Default));
        assert_eq!((resolver.entity, resolver.regex, resolver.default), (1, 1, 1));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag("Non-compliant"), Some(false));
        assert_eq!(parse_flag("not satisfactory"), Some(false));
        assert_eq!(parse_flag("Satisfactory"), Some(true));
        assert_eq!(parse_flag("None"), Some(false));
        assert_eq!(parse_flag("unknown"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_month_arithmetic_clamps_to_month_end() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(
            sub_months(date, 1, "periodStart").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            add_months(date, 6, "noticeDate").unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()
        );
    }
}
