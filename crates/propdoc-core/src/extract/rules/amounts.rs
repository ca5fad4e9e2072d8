//! Currency amount extraction.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::CURRENCY_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Currency-prefixed amount extractor (`$1,230.50`, `£45.00`).
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CURRENCY_AMOUNT
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let amount = parse_amount(&caps[1])?;
                Some(
                    ExtractionMatch::new(amount, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

/// Largest currency amount in the text.
///
/// On a bill the total is usually the largest figure on the page.
pub fn max_amount(text: &str) -> Option<Decimal> {
    AmountExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .max()
}

/// Parse an amount, ignoring everything except digits and the decimal point.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}
