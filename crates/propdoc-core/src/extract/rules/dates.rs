//! Date token extraction.

use chrono::NaiveDate;

use super::patterns::DATE_DMY;
use super::{ExtractionMatch, FieldExtractor};

/// Two-digit years below this pivot are read as 20xx, others as 19xx.
const YEAR_PIVOT: i32 = 50;

/// Extractor for `D/M/Y` and `D-M-Y` date tokens.
///
/// Tokens are read day-first. When the day-first reading is not a calendar date (e.g.
/// `03/14/2024`) the month-first reading is used instead.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in DATE_DMY.captures_iter(text) {
            let first: u32 = caps[1].parse().unwrap_or(0);
            let second: u32 = caps[2].parse().unwrap_or(0);
            let year = normalize_year(&caps[3]);

            let date = NaiveDate::from_ymd_opt(year, second, first)
                .or_else(|| NaiveDate::from_ymd_opt(year, first, second));

            if let (Some(date), Some(full_match)) = (date, caps.get(0)) {
                results.push(
                    ExtractionMatch::new(date, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

/// Earliest and latest date found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

/// Collect all date tokens, sort them and return the outer bounds.
///
/// This is deliberately lossy: the earliest date stands in for a period start or issue date and
/// the latest for a period end, bill date or expiry date.
pub fn date_span(text: &str) -> Option<DateSpan> {
    let mut dates: Vec<NaiveDate> = DateExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect();
    dates.sort();

    Some(DateSpan {
        earliest: *dates.first()?,
        latest: *dates.last()?,
    })
}

fn normalize_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if s.len() <= 2 {
        if year < YEAR_PIVOT {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}
