//! Field schemas: entity tag, baseline confidence and importance per field.

/// One field of a document type's schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Serialized (camelCase) field name.
    pub name: &'static str,
    /// Entity type the intelligence service uses for this field.
    pub entity_type: &'static str,
    /// Confidence reported when no entity backs the field.
    pub baseline: f32,
    /// Totals and dates; simulated confidence for these gets a higher floor.
    pub important: bool,
}

const fn field(name: &'static str, entity_type: &'static str, baseline: f32, important: bool) -> FieldSpec {
    FieldSpec {
        name,
        entity_type,
        baseline,
        important,
    }
}

/// Entity type tags.
pub mod tags {
    pub const UTILITY_TYPE: &str = "utility_type";
    pub const INVOICE_DATE: &str = "invoice_date";
    pub const PERIOD_START: &str = "period_start";
    pub const PERIOD_END: &str = "period_end";
    pub const TOTAL_AMOUNT: &str = "total_amount";
    pub const USAGE_QUANTITY: &str = "usage_quantity";
    pub const USAGE_UNIT: &str = "usage_unit";
    pub const METER_NUMBER: &str = "meter_number";
    pub const RATE: &str = "rate";

    pub const TENANT_NAME: &str = "tenant_name";
    pub const LANDLORD_NAME: &str = "landlord_name";
    pub const PROPERTY_ADDRESS: &str = "property_address";
    pub const LEASE_START_DATE: &str = "lease_start_date";
    pub const LEASE_END_DATE: &str = "lease_end_date";
    pub const RENT_AMOUNT: &str = "rent_amount";
    pub const PAYMENT_FREQUENCY: &str = "payment_frequency";
    pub const DEPOSIT_AMOUNT: &str = "deposit_amount";
    pub const BREAK_CLAUSE: &str = "break_clause";
    pub const NOTICE_DATE: &str = "notice_date";

    pub const PROPERTY_NAME: &str = "property_name";
    pub const BUDGET_YEAR: &str = "budget_year";
    pub const TOTAL_BUDGET: &str = "total_budget";
    pub const BUDGET_CATEGORY: &str = "budget_category";
    pub const UNIT_COST: &str = "unit_cost";

    pub const CERTIFICATE_TYPE: &str = "certificate_type";
    pub const CERTIFICATE_NUMBER: &str = "certificate_number";
    pub const ISSUE_DATE: &str = "issue_date";
    pub const EXPIRY_DATE: &str = "expiry_date";
    pub const COMPLIANCE_STATUS: &str = "compliance_status";
    pub const ENERGY_RATING: &str = "energy_rating";
    pub const INSPECTOR_NAME: &str = "inspector_name";
}

pub const UTILITY_FIELDS: &[FieldSpec] = &[
    field("utilityType", tags::UTILITY_TYPE, 0.80, false),
    field("billDate", tags::INVOICE_DATE, 0.85, true),
    field("periodStart", tags::PERIOD_START, 0.75, true),
    field("periodEnd", tags::PERIOD_END, 0.75, true),
    field("totalAmount", tags::TOTAL_AMOUNT, 0.90, true),
    field("usageQuantity", tags::USAGE_QUANTITY, 0.70, false),
    field("usageUnit", tags::USAGE_UNIT, 0.70, false),
    field("meterReference", tags::METER_NUMBER, 0.60, false),
    field("rateInformation", tags::RATE, 0.50, false),
];

pub const LEASE_FIELDS: &[FieldSpec] = &[
    field("tenantName", tags::TENANT_NAME, 0.70, false),
    field("landlordName", tags::LANDLORD_NAME, 0.70, false),
    field("propertyAddress", tags::PROPERTY_ADDRESS, 0.65, false),
    field("startDate", tags::LEASE_START_DATE, 0.80, true),
    field("endDate", tags::LEASE_END_DATE, 0.80, true),
    field("rentalValue", tags::RENT_AMOUNT, 0.85, true),
    field("paymentFrequency", tags::PAYMENT_FREQUENCY, 0.75, false),
    field("depositAmount", tags::DEPOSIT_AMOUNT, 0.60, false),
    field("breakClause", tags::BREAK_CLAUSE, 0.50, false),
    field("noticeDate", tags::NOTICE_DATE, 0.50, true),
];

pub const SERVICE_CHARGE_FIELDS: &[FieldSpec] = &[
    field("propertyName", tags::PROPERTY_NAME, 0.60, false),
    field("budgetYear", tags::BUDGET_YEAR, 0.85, true),
    field("totalBudget", tags::TOTAL_BUDGET, 0.90, true),
    field("periodStart", tags::PERIOD_START, 0.70, true),
    field("periodEnd", tags::PERIOD_END, 0.70, true),
    field("categoryBreakdown", tags::BUDGET_CATEGORY, 0.65, false),
    field("unitCosts", tags::UNIT_COST, 0.50, false),
];

pub const COMPLIANCE_FIELDS: &[FieldSpec] = &[
    field("documentSubtype", tags::CERTIFICATE_TYPE, 0.80, false),
    field("certificateNumber", tags::CERTIFICATE_NUMBER, 0.70, false),
    field("issueDate", tags::ISSUE_DATE, 0.85, true),
    field("expiryDate", tags::EXPIRY_DATE, 0.80, true),
    field("isCompliant", tags::COMPLIANCE_STATUS, 0.65, false),
    field("rating", tags::ENERGY_RATING, 0.75, false),
    field("inspectorName", tags::INSPECTOR_NAME, 0.55, false),
    field("propertyAddress", tags::PROPERTY_ADDRESS, 0.60, false),
];
