//! Common regex patterns for property document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Cross-type patterns
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"[$£€]\s*([0-9][0-9,]*\.[0-9]{2})"
    ).unwrap();

    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[/\-](\d{1,2})[/\-](\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref PROPERTY_ADDRESS: Regex = Regex::new(
        r"(?im)^[ \t]*(?:property|premises)(?:[ \t]+address)?[ \t]*[:\-][ \t]*(.+?)[ \t]*$"
    ).unwrap();

    // Utility bills
    pub static ref METER_REFERENCE: Regex = Regex::new(
        r"\b(?i:meter|reference)\b\s*(?i:no\.?|number)?\s*[#:]*\s*([A-Z0-9]{5,})"
    ).unwrap();

    pub static ref USAGE: Regex = Regex::new(
        r"(?i)\b([0-9][0-9,]*(?:\.[0-9]+)?)\s*(kwh|kw|m3|gallons|therms|units)\b"
    ).unwrap();

    pub static ref RATE: Regex = Regex::new(
        r"(?i)([$£€]\s*[0-9]+(?:\.[0-9]+)?\s*(?:per|/)\s*(?:kwh|kw|m3|gallon|therm|unit)s?)"
    ).unwrap();

    // Lease agreements
    pub static ref TENANT_NAME: Regex = Regex::new(
        r"(?im)\b(?:tenant|lessee)(?:[ \t]+name)?\b[ \t:]*([A-Za-z][A-Za-z \t]*?)[ \t]*(?:,|\.|\band\b|$)"
    ).unwrap();

    pub static ref LANDLORD_NAME: Regex = Regex::new(
        r"(?im)\b(?:landlord|lessor)(?:[ \t]+name)?\b[ \t:]*([A-Za-z][A-Za-z \t]*?)[ \t]*(?:,|\.|\band\b|$)"
    ).unwrap();

    pub static ref RENT_AMOUNT: Regex = Regex::new(
        r"(?i)\b(?:annual rent|monthly rent|rental value|rent)\b[^$£€\d\n]{0,40}[$£€]\s*([0-9][0-9,]*(?:\.[0-9]{2})?)"
    ).unwrap();

    pub static ref DEPOSIT_AMOUNT: Regex = Regex::new(
        r"(?i)\bdeposit\b[^$£€\d\n]{0,40}[$£€]\s*([0-9][0-9,]*(?:\.[0-9]{2})?)"
    ).unwrap();

    // Service-charge budgets
    pub static ref TOTAL_BUDGET: Regex = Regex::new(
        r"(?i)\btotal\s+(?:annual\s+)?(?:budget|service\s+charge|expenditure)\b[^0-9\n]{0,20}([0-9][0-9,]*(?:\.[0-9]{2})?)"
    ).unwrap();

    pub static ref BUDGET_YEAR: Regex = Regex::new(
        r"(?i)\b(?:budget\s+year|financial\s+year|year\s+ending|year|budget)\b[^0-9\n]{0,20}((?:19|20)[0-9]{2})\b"
    ).unwrap();

    pub static ref YEAR: Regex = Regex::new(
        r"\b((?:19|20)[0-9]{2})\b"
    ).unwrap();

    pub static ref PROPERTY_NAME: Regex = Regex::new(
        r"(?im)^[ \t]*(?:property|building|development|estate)(?:[ \t]+name)?[ \t]*[:\-][ \t]*(.+?)[ \t]*$"
    ).unwrap();

    pub static ref BUDGET_LINE: Regex = Regex::new(
        r"(?m)^[ \t]*([A-Za-z][A-Za-z &/\-]{1,40}?)[ \t]*[:\-]?[ \t]*[$£€][ \t]*([0-9][0-9,]*\.[0-9]{2})[ \t]*$"
    ).unwrap();

    // Entity mentions such as "Cleaning: $1,200.00"
    pub static ref BUDGET_ENTITY: Regex = Regex::new(
        r"^\s*(.*?[A-Za-z].*?)[\s:\-]*[$£€]?\s*([0-9][0-9,]*(?:\.[0-9]+)?)\s*$"
    ).unwrap();

    // Entity mentions such as "Two Bed x 12 @ £1,250.00"
    pub static ref UNIT_COST_ENTITY: Regex = Regex::new(
        r"(?i)^\s*(.+?)\s*(?:x|×|\*)\s*([0-9]+)\s*(?:@|at)\s*[$£€]?\s*([0-9][0-9,]*(?:\.[0-9]+)?)"
    ).unwrap();

    // Compliance certificates
    pub static ref CERTIFICATE_NUMBER: Regex = Regex::new(
        r"\b(?i:certificate|cert|report|reference|ref)\b\.?[ \t]*(?i:no\.?|number|#)?[ \t]*[:#]?[ \t]*([A-Z0-9][A-Z0-9\-/]{4,})"
    ).unwrap();

    pub static ref EPC_RATING: Regex = Regex::new(
        r"(?i)\brating[\s:]+([A-G])\b"
    ).unwrap();

    pub static ref INSPECTOR_NAME: Regex = Regex::new(
        r"(?im)^[ \t]*(?:inspector|assessor|engineer|surveyor|inspected by)(?:[ \t]+name)?[ \t]*[:\-][ \t]*(.+?)[ \t]*$"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_reference_requires_uppercase_reference() {
        let caps = METER_REFERENCE.captures("Meter #: AB123456").unwrap();
        assert_eq!(&caps[1], "AB123456");

        let caps = METER_REFERENCE.captures("Meter Number: 98765432").unwrap();
        assert_eq!(&caps[1], "98765432");

        assert!(METER_REFERENCE.captures("meter reading taken").is_none());
    }

    #[test]
    fn test_tenant_name_stops_at_separator() {
        let caps = TENANT_NAME.captures("The Tenant: John Smith, of 4 Elm Road").unwrap();
        assert_eq!(&caps[1], "John Smith");

        let caps = TENANT_NAME.captures("Lessee Jane Doe and the Landlord").unwrap();
        assert_eq!(&caps[1], "Jane Doe");
    }

    #[test]
    fn test_budget_line() {
        let caps = BUDGET_LINE.captures("  Cleaning: $1,200.00").unwrap();
        assert_eq!(&caps[1], "Cleaning");
        assert_eq!(&caps[2], "1,200.00");
    }

    #[test]
    fn test_budget_entity() {
        let caps = BUDGET_ENTITY.captures("Lift Maintenance - £3,200.00").unwrap();
        assert_eq!(&caps[1], "Lift Maintenance");
        assert_eq!(&caps[2], "3,200.00");

        let caps = BUDGET_ENTITY.captures("Block 2 lighting 300").unwrap();
        assert_eq!(&caps[1], "Block 2 lighting");
        assert_eq!(&caps[2], "300");
    }

    #[test]
    fn test_unit_cost_entity() {
        let caps = UNIT_COST_ENTITY.captures("Two Bed x 12 @ £1,250.00").unwrap();
        assert_eq!(&caps[1], "Two Bed");
        assert_eq!(&caps[2], "12");
        assert_eq!(&caps[3], "1,250.00");
    }
}
