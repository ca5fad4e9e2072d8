//! Typed field sets produced for each document type.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::document::DocumentType;

/// Field name (camelCase, matching the serialized field) to confidence in [0, 1].
pub type ConfidenceScores = BTreeMap<String, f32>;

/// Extracted data for one document, tagged by document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "documentType", rename_all = "kebab-case")]
pub enum ExtractedFields {
    Utility(UtilityFields),
    Lease(LeaseFields),
    ServiceCharge(ServiceChargeFields),
    Compliance(ComplianceFields),
}

impl ExtractedFields {
    pub fn document_type(&self) -> DocumentType {
        match self {
            Self::Utility(_) => DocumentType::Utility,
            Self::Lease(_) => DocumentType::Lease,
            Self::ServiceCharge(_) => DocumentType::ServiceCharge,
            Self::Compliance(_) => DocumentType::Compliance,
        }
    }

    /// Names of required fields that are empty.
    ///
    /// A fully parsed document always returns an empty list.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str, present: bool| {
            if !present {
                missing.push(name);
            }
        };

        match self {
            Self::Utility(f) => {
                require("usageUnit", !f.usage_unit.trim().is_empty());
                require("meterReference", !f.meter_reference.trim().is_empty());
                require("rateInformation", !f.rate_information.trim().is_empty());
            }
            Self::Lease(f) => {
                require("tenantName", !f.tenant_name.trim().is_empty());
                require("landlordName", !f.landlord_name.trim().is_empty());
                require("propertyAddress", !f.property_address.trim().is_empty());
            }
            Self::ServiceCharge(f) => {
                require("propertyName", !f.property_name.trim().is_empty());
                require("categoryBreakdown", !f.category_breakdown.is_empty());
            }
            Self::Compliance(f) => {
                require("certificateNumber", !f.certificate_number.trim().is_empty());
                require("inspectorName", !f.inspector_name.trim().is_empty());
                require("propertyAddress", !f.property_address.trim().is_empty());
                if f.document_subtype == ComplianceSubtype::Epc {
                    require(
                        "rating",
                        f.rating.as_deref().is_some_and(|r| !r.trim().is_empty()),
                    );
                }
            }
        }

        missing
    }
}

/// Utility bill fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityFields {
    pub utility_type: UtilityType,
    pub bill_date: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_amount: Decimal,
    pub usage_quantity: Decimal,
    pub usage_unit: String,
    pub meter_reference: String,
    pub rate_information: String,
}

/// Kind of utility on a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilityType {
    Electricity,
    Gas,
    Water,
    Other,
}

impl UtilityType {
    /// Unit used when the bill does not state one.
    pub fn default_unit(&self) -> &'static str {
        match self {
            Self::Electricity => "kWh",
            Self::Gas => "m³",
            Self::Water => "gallons",
            Self::Other => "units",
        }
    }

    /// Interpret a free-text label such as "Electric" or "natural gas".
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        if label.is_empty() {
            None
        } else if label.contains("electric") {
            Some(Self::Electricity)
        } else if label.contains("gas") {
            Some(Self::Gas)
        } else if label.contains("water") {
            Some(Self::Water)
        } else {
            Some(Self::Other)
        }
    }
}

/// Lease agreement fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseFields {
    pub tenant_name: String,
    pub landlord_name: String,
    pub property_address: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rental_value: Decimal,
    pub payment_frequency: PaymentFrequency,
    pub deposit_amount: Decimal,
    pub break_clause: bool,
    pub notice_date: NaiveDate,
}

/// How often rent is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    Annually,
}

impl PaymentFrequency {
    const MONTHLY: [&'static str; 3] = ["monthly", "per month", "per calendar month"];
    const QUARTERLY: [&'static str; 2] = ["quarterly", "per quarter"];
    const ANNUALLY: [&'static str; 4] = ["annual", "per annum", "yearly", "per year"];

    /// Keyword containment in priority order: monthly, quarterly, annually.
    ///
    /// Term lengths such as "24 months" or "5 years" do not count.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        let has = |keywords: &[&str]| keywords.iter().any(|k| label.contains(k));

        if has(&Self::MONTHLY) {
            Some(Self::Monthly)
        } else if has(&Self::QUARTERLY) {
            Some(Self::Quarterly)
        } else if has(&Self::ANNUALLY) {
            Some(Self::Annually)
        } else {
            None
        }
    }
}

/// Service-charge budget fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceChargeFields {
    pub property_name: String,
    pub budget_year: i32,
    pub total_budget: Decimal,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub category_breakdown: Vec<BudgetCategory>,
    #[serde(default)]
    pub unit_costs: Vec<UnitCost>,
}

/// One line of a service-charge budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub name: String,
    pub amount: Decimal,
}

/// Apportioned cost for one type of unit in the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitCost {
    pub unit_type: String,
    pub unit_count: u32,
    pub unit_cost: Decimal,
}

/// Compliance certificate fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceFields {
    pub document_subtype: ComplianceSubtype,
    pub certificate_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub is_compliant: bool,
    /// EPC letter grade; only set for energy performance certificates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    pub inspector_name: String,
    pub property_address: String,
}

/// Kind of compliance certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceSubtype {
    FireSafety,
    Electrical,
    Epc,
    GasSafety,
    Asbestos,
    Other,
}

impl ComplianceSubtype {
    /// Subtypes in keyword-match priority order.
    pub const DETECTION_ORDER: [ComplianceSubtype; 5] = [
        ComplianceSubtype::FireSafety,
        ComplianceSubtype::Electrical,
        ComplianceSubtype::Epc,
        ComplianceSubtype::GasSafety,
        ComplianceSubtype::Asbestos,
    ];

    /// Lower-case keywords identifying this subtype in document text.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::FireSafety => &["fire safety", "fire risk", "fire alarm"],
            Self::Electrical => &["electrical", "eicr"],
            Self::Epc => &["energy performance", "epc"],
            Self::GasSafety => &["gas safety", "gas safe", "cp12"],
            Self::Asbestos => &["asbestos"],
            Self::Other => &[],
        }
    }

    /// Number of months the certificate stays valid.
    pub fn validity_months(&self) -> u32 {
        match self {
            Self::Epc => 120,
            _ => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FireSafety => "Fire Safety Certificate",
            Self::Electrical => "Electrical Installation Condition Report",
            Self::Epc => "Energy Performance Certificate",
            Self::GasSafety => "Gas Safety Certificate",
            Self::Asbestos => "Asbestos Survey",
            Self::Other => "Compliance Certificate",
        }
    }

    /// Interpret a free-text label by keyword containment.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        if label.trim().is_empty() {
            return None;
        }
        Self::DETECTION_ORDER
            .into_iter()
            .find(|subtype| subtype.keywords().iter().any(|k| label.contains(k)))
            .or(Some(Self::Other))
    }
}
