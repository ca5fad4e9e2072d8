//! Text heuristics for compliance certificates.

use chrono::NaiveDate;

use crate::models::ComplianceSubtype;

use super::patterns::{CERTIFICATE_NUMBER, EPC_RATING, INSPECTOR_NAME, PROPERTY_ADDRESS};
use super::{FallbackFields, capture, contains_any, date_span};

/// Negated forms of the positive keywords; these contain a positive keyword as a substring.
const NEGATED_KEYWORDS: [&str; 5] = [
    "unsatisfactory",
    "non-compliant",
    "non compliant",
    "noncompliant",
    "not compliant",
];
/// Checked before the remaining negatives, so a pass with a noted defect reads as compliant.
const COMPLIANT_KEYWORDS: [&str; 3] = ["compliant", "satisfactory", "pass"];
const NON_COMPLIANT_KEYWORDS: [&str; 3] = ["fail", "dangerous", "defect"];

/// Compliance fields recovered from certificate text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplianceHints {
    pub document_subtype: Option<ComplianceSubtype>,
    pub certificate_number: Option<String>,
    pub is_compliant: Option<bool>,
    pub rating: Option<String>,
    pub inspector_name: Option<String>,
    pub property_address: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
}

/// Scan certificate text for compliance fields.
pub fn scan(text: &str) -> ComplianceHints {
    let lower = text.to_lowercase();
    let span = date_span(text);

    let document_subtype = ComplianceSubtype::DETECTION_ORDER
        .into_iter()
        .find(|subtype| contains_any(&lower, subtype.keywords()));

    let is_compliant = if contains_any(&lower, &NEGATED_KEYWORDS) {
        Some(false)
    } else if contains_any(&lower, &COMPLIANT_KEYWORDS) {
        Some(true)
    } else if contains_any(&lower, &NON_COMPLIANT_KEYWORDS) {
        Some(false)
    } else {
        None
    };

    ComplianceHints {
        document_subtype,
        certificate_number: capture(&CERTIFICATE_NUMBER, text),
        is_compliant,
        rating: capture(&EPC_RATING, text).map(|r| r.to_uppercase()),
        inspector_name: capture(&INSPECTOR_NAME, text),
        property_address: capture(&PROPERTY_ADDRESS, text),
        issue_date: span.map(|s| s.earliest),
        expiry_date: span.map(|s| s.latest),
    }
}

pub(crate) fn scan_fields(text: &str) -> FallbackFields {
    FallbackFields::Compliance(scan(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_epc() {
        let text = "ENERGY PERFORMANCE CERTIFICATE\n\
                    Certificate Number: 0123-4567-8910\n\
                    Property: Flat 2, 8 Mill Lane\n\
                    Assessor: Tom Baker\n\
                    Current energy rating D\n\
                    Date of assessment 12/04/2023";

        let hints = scan(text);
        assert_eq!(hints.document_subtype, Some(ComplianceSubtype::Epc));
        assert_eq!(hints.certificate_number.as_deref(), Some("0123-4567-8910"));
        assert_eq!(hints.rating.as_deref(), Some("D"));
        assert_eq!(hints.inspector_name.as_deref(), Some("Tom Baker"));
        assert_eq!(hints.property_address.as_deref(), Some("Flat 2, 8 Mill Lane"));
        assert_eq!(hints.issue_date, NaiveDate::from_ymd_opt(2023, 4, 12));
        assert_eq!(hints.is_compliant, None);
    }

    #[test]
    fn test_fire_safety_wins_over_electrical() {
        let hints = scan("Fire safety inspection of electrical fire alarm panel");
        assert_eq!(hints.document_subtype, Some(ComplianceSubtype::FireSafety));
    }

    #[test]
    fn test_compliance_keywords() {
        assert_eq!(scan("Installation is SATISFACTORY").is_compliant, Some(true));
        assert_eq!(scan("Appliance failed: dangerous").is_compliant, Some(false));
        assert_eq!(scan("Gas Safety Record").is_compliant, None);
    }

    #[test]
    fn test_negated_result_is_not_compliant() {
        let hints = scan("ELECTRICAL INSTALLATION CONDITION REPORT\nOverall assessment: UNSATISFACTORY");
        assert_eq!(hints.document_subtype, Some(ComplianceSubtype::Electrical));
        assert_eq!(hints.is_compliant, Some(false));

        assert_eq!(scan("Premises found non-compliant").is_compliant, Some(false));
        assert_eq!(scan("Alarm system is not compliant").is_compliant, Some(false));
        assert_eq!(scan("Passed, minor defect noted").is_compliant, Some(true));
    }
}
