//! Text heuristics for utility bills.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::UtilityType;

use super::patterns::{METER_REFERENCE, RATE, USAGE};
use super::{FallbackFields, capture, contains_any, date_span, max_amount, parse_amount};

/// Utility keywords in priority order.
const UTILITY_KEYWORDS: [(UtilityType, &[&str]); 3] = [
    (UtilityType::Electricity, &["electric", "kwh"]),
    (UtilityType::Gas, &["gas", "therm"]),
    (UtilityType::Water, &["water", "gallon"]),
];

/// Utility fields recovered from bill text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtilityHints {
    pub utility_type: Option<UtilityType>,
    pub meter_reference: Option<String>,
    pub usage_quantity: Option<Decimal>,
    pub usage_unit: Option<String>,
    pub rate_information: Option<String>,
    pub total_amount: Option<Decimal>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub bill_date: Option<NaiveDate>,
}

/// Scan bill text for utility fields.
pub fn scan(text: &str) -> UtilityHints {
    let lower = text.to_lowercase();

    let utility_type = UTILITY_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(utility_type, _)| *utility_type);

    let (usage_quantity, usage_unit) = match USAGE.captures(text) {
        Some(caps) => (
            parse_amount(&caps[1].replace(',', "")),
            Some(caps[2].to_lowercase()),
        ),
        None => (None, None),
    };

    let span = date_span(text);

    UtilityHints {
        utility_type,
        meter_reference: capture(&METER_REFERENCE, text),
        usage_quantity,
        usage_unit,
        rate_information: capture(&RATE, text),
        total_amount: max_amount(text),
        period_start: span.map(|s| s.earliest),
        period_end: span.map(|s| s.latest),
        bill_date: span.map(|s| s.latest),
    }
}

pub(crate) fn scan_fields(text: &str) -> FallbackFields {
    FallbackFields::Utility(scan(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_electric_takes_priority_over_gas() {
        let hints = scan("Dual fuel statement: electric and gas charges");
        assert_eq!(hints.utility_type, Some(UtilityType::Electricity));

        let hints = scan("Your gas bill, 42 therms used");
        assert_eq!(hints.utility_type, Some(UtilityType::Gas));

        let hints = scan("Water and sewer, 3,400 gallons");
        assert_eq!(hints.utility_type, Some(UtilityType::Water));
        assert_eq!(hints.usage_quantity, Some(Decimal::new(3400, 0)));
        assert_eq!(hints.usage_unit.as_deref(), Some("gallons"));
    }

    #[test]
    fn test_full_bill() {
        let text = "CITY POWER - Electricity Bill\n\
                    Meter #: EM00123456\n\
                    Billing period: 03/14/2024 - 01/02/24\n\
                    Usage: 1,250 kWh at $0.15 per kWh\n\
                    Standing charge $45.00\n\
                    Total due $230.50";

        let hints = scan(text);
        assert_eq!(hints.utility_type, Some(UtilityType::Electricity));
        assert_eq!(hints.meter_reference.as_deref(), Some("EM00123456"));
        assert_eq!(hints.usage_quantity, Some(Decimal::new(1250, 0)));
        assert_eq!(hints.usage_unit.as_deref(), Some("kwh"));
        assert_eq!(hints.rate_information.as_deref(), Some("$0.15 per kWh"));
        assert_eq!(hints.total_amount, Some(Decimal::new(23050, 2)));
        assert_eq!(hints.period_start, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(hints.period_end, NaiveDate::from_ymd_opt(2024, 3, 14));
        assert_eq!(hints.bill_date, hints.period_end);
    }

    #[test]
    fn test_empty_text_yields_no_hints() {
        assert_eq!(scan(""), UtilityHints::default());
    }
}
