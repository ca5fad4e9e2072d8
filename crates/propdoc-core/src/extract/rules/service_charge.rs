//! Text heuristics for service-charge budgets.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::BudgetCategory;

use super::patterns::{BUDGET_LINE, BUDGET_YEAR, PROPERTY_NAME, TOTAL_BUDGET};
use super::{FallbackFields, capture, date_span, max_amount, parse_amount};

/// Service-charge fields recovered from budget text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceChargeHints {
    pub property_name: Option<String>,
    pub budget_year: Option<i32>,
    pub total_budget: Option<Decimal>,
    pub categories: Vec<BudgetCategory>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

/// Scan budget text for service-charge fields.
pub fn scan(text: &str) -> ServiceChargeHints {
    let span = date_span(text);

    let total_budget = capture(&TOTAL_BUDGET, text)
        .and_then(|s| parse_amount(&s))
        .or_else(|| max_amount(text));

    ServiceChargeHints {
        property_name: capture(&PROPERTY_NAME, text),
        budget_year: capture(&BUDGET_YEAR, text).and_then(|s| s.parse().ok()),
        total_budget,
        categories: budget_lines(text),
        period_start: span.map(|s| s.earliest),
        period_end: span.map(|s| s.latest),
    }
}

/// Lines of the form `Cleaning: $1,200.00`, excluding totals.
fn budget_lines(text: &str) -> Vec<BudgetCategory> {
    BUDGET_LINE
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps[1].trim().to_string();
            if name.to_lowercase().starts_with("total") {
                return None;
            }
            let amount = parse_amount(&caps[2])?;
            Some(BudgetCategory { name, amount })
        })
        .collect()
}

pub(crate) fn scan_fields(text: &str) -> FallbackFields {
    FallbackFields::ServiceCharge(scan(text))
}
