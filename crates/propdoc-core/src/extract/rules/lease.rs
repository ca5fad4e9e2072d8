//! Text heuristics for lease agreements.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::PaymentFrequency;

use super::patterns::{DEPOSIT_AMOUNT, LANDLORD_NAME, PROPERTY_ADDRESS, RENT_AMOUNT, TENANT_NAME};
use super::{FallbackFields, capture, contains_any, date_span, parse_amount};

const BREAK_CLAUSE_KEYWORDS: [&str; 3] = ["break clause", "break option", "option to break"];

/// Lease fields recovered from agreement text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaseHints {
    pub tenant_name: Option<String>,
    pub landlord_name: Option<String>,
    pub property_address: Option<String>,
    pub rental_value: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
    pub payment_frequency: Option<PaymentFrequency>,
    pub break_clause: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Scan agreement text for lease fields.
pub fn scan(text: &str) -> LeaseHints {
    let lower = text.to_lowercase();
    let span = date_span(text);

    LeaseHints {
        tenant_name: capture(&TENANT_NAME, text),
        landlord_name: capture(&LANDLORD_NAME, text),
        property_address: capture(&PROPERTY_ADDRESS, text),
        rental_value: capture(&RENT_AMOUNT, text).and_then(|s| parse_amount(&s)),
        deposit_amount: capture(&DEPOSIT_AMOUNT, text).and_then(|s| parse_amount(&s)),
        payment_frequency: PaymentFrequency::from_label(&lower),
        break_clause: contains_any(&lower, &BREAK_CLAUSE_KEYWORDS).then_some(true),
        start_date: span.map(|s| s.earliest),
        end_date: span.map(|s| s.latest),
    }
}

pub(crate) fn scan_fields(text: &str) -> FallbackFields {
    FallbackFields::Lease(scan(text))
}
