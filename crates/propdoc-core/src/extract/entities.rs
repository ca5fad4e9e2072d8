//! Accessors over the entity list returned by the intelligence service.
//!
//! All accessors are total: an absent entity yields the type's empty value.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::models::{Entity, RawDocument};

use super::rules::amounts::parse_amount;

fn first<'a>(entities: &'a [Entity], entity_type: &str) -> Option<&'a Entity> {
    entities.iter().find(|e| e.entity_type == entity_type)
}

/// Mention text of the first entity of `entity_type`, or an empty string.
pub fn extract_text(entities: &[Entity], entity_type: &str) -> String {
    first(entities, entity_type)
        .map(|e| e.mention_text.trim().to_string())
        .unwrap_or_default()
}

/// Numeric value of the first entity of `entity_type`.
///
/// Everything except digits and `.` is stripped before parsing, so `"$1,230.50"` reads as
/// `1230.50`.
pub fn extract_number(entities: &[Entity], entity_type: &str) -> Option<Decimal> {
    first(entities, entity_type).and_then(|e| parse_amount(&e.mention_text))
}

/// Normalized date of the first entity of `entity_type`, formatted `YYYY-MM-DD`.
///
/// Missing month or day default to 1. Returns an empty string when the entity, its normalized
/// value or its year is absent. The output is not validated as a calendar date.
pub fn extract_date(entities: &[Entity], entity_type: &str) -> String {
    let Some(date) = first(entities, entity_type)
        .and_then(|e| e.normalized_value.as_ref())
        .and_then(|v| v.date_value)
    else {
        return String::new();
    };

    match date.year {
        Some(year) => format!(
            "{:04}-{:02}-{:02}",
            year,
            date.month.unwrap_or(1),
            date.day.unwrap_or(1)
        ),
        None => String::new(),
    }
}

/// Mean confidence over all entities of `entity_type`, or 0 when none match.
pub fn average_confidence(document: &RawDocument, entity_type: &str) -> f32 {
    let (sum, count) = document
        .entities
        .iter()
        .filter(|e| e.entity_type == entity_type)
        .fold((0.0f32, 0usize), |(sum, count), e| (sum + e.confidence, count + 1));

    if count == 0 {
        return 0.0;
    }

    let mean = sum / count as f32;
    if mean.is_finite() { mean.clamp(0.0, 1.0) } else { 0.0 }
}

/// Entity date as a calendar date.
///
/// `Ok(None)` when no date is present; an error when the normalized value does not describe a
/// real date.
pub fn entity_date(
    entities: &[Entity],
    entity_type: &str,
) -> Result<Option<NaiveDate>, ExtractionError> {
    let formatted = extract_date(entities, entity_type);
    if formatted.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(&formatted, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ExtractionError::InvalidDate {
            field: entity_type.to_string(),
            value: formatted,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateValue, NormalizedValue};

    fn entities() -> Vec<Entity> {
        vec![
            Entity::new("total_amount", " $1,230.50 ", 0.9),
            Entity::new("total_amount", "$99.00", 0.5),
            Entity::new("supplier_name", "  City Power ", 0.8),
            Entity::new("invoice_date", "14/03/2024", 0.95).with_date(2024, 3, 14),
            Entity::new("meter_number", "n/a", 0.4),
        ]
    }

    #[test]
    fn test_extract_text_first_match() {
        assert_eq!(extract_text(&entities(), "supplier_name"), "City Power");
        assert_eq!(extract_text(&entities(), "total_amount"), "$1,230.50");
        assert_eq!(extract_text(&entities(), "absent"), "");
    }

    #[test]
    fn test_extract_number() {
        assert_eq!(
            extract_number(&entities(), "total_amount"),
            Some(Decimal::new(123050, 2))
        );
        assert_eq!(extract_number(&entities(), "meter_number"), None);
        assert_eq!(extract_number(&entities(), "absent"), None);
    }

    #[test]
    fn test_extract_date_defaults_month_and_day() {
        let partial = vec![Entity {
            entity_type: "period_start".into(),
            mention_text: "2024".into(),
            confidence: 0.7,
            normalized_value: Some(NormalizedValue {
                text: None,
                date_value: Some(DateValue {
                    year: Some(2024),
                    month: None,
                    day: None,
                }),
            }),
        }];

        assert_eq!(extract_date(&partial, "period_start"), "2024-01-01");
        assert_eq!(extract_date(&entities(), "invoice_date"), "2024-03-14");
        assert_eq!(extract_date(&entities(), "total_amount"), "");
    }

    #[test]
    fn test_average_confidence() {
        let document = RawDocument::new("", entities());
        assert!((average_confidence(&document, "total_amount") - 0.7).abs() < 1e-6);
        assert_eq!(average_confidence(&document, "absent"), 0.0);
    }

    #[test]
    fn test_entity_date_rejects_impossible_dates() {
        let bad = vec![Entity::new("invoice_date", "??", 0.9).with_date(2024, 13, 1)];
        let err = entity_date(&bad, "invoice_date").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidDate { .. }));

        assert_eq!(
            entity_date(&entities(), "invoice_date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 14)
        );
        assert_eq!(entity_date(&entities(), "absent").unwrap(), None);
    }
}
