//! Synthetic field sets used when real extraction cannot complete.
//!
//! Generated data is internally consistent: dates are ordered, derived totals add up and every
//! required field is populated. A seeded [`fastrand::Rng`] makes the output reproducible.

mod data;

use chrono::{Datelike, Duration, Months, NaiveDate};
use fastrand::Rng;
use rust_decimal::Decimal;
use tracing::info;

use crate::extract::schema::FieldSpec;
use crate::models::{
    BudgetCategory, ComplianceFields, ComplianceSubtype, ConfidenceScores, DocumentType,
    ExtractedFields, LeaseFields, PaymentFrequency, ServiceChargeFields, UnitCost, UtilityFields,
    UtilityType,
};

use data::{
    BUDGET_CATEGORIES, EPC_BANDS, INSPECTOR_NAMES, LANDLORD_NAMES, PROPERTY_NAMES,
    STREET_ADDRESSES, TENANT_NAMES, UNIT_WEIGHTS,
};

/// Synthetic data plus its confidence map.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedExtraction {
    pub data: ExtractedFields,
    pub confidence_scores: ConfidenceScores,
}

/// Produces synthetic extractions for any document type.
pub struct SimulationGenerator {
    rng: Rng,
    today: NaiveDate,
}

impl SimulationGenerator {
    pub fn new(rng: Rng, today: NaiveDate) -> Self {
        Self { rng, today }
    }

    /// Seeded when `seed` is set, otherwise randomly seeded.
    pub fn from_seed(seed: Option<u64>, today: NaiveDate) -> Self {
        let rng = seed.map_or_else(Rng::new, Rng::with_seed);
        Self::new(rng, today)
    }

    /// Generate a complete field set for `document_type`.
    ///
    /// `file_name` is only logged.
    pub fn generate(
        &mut self,
        document_type: DocumentType,
        file_name: Option<&str>,
    ) -> SimulatedExtraction {
        info!(
            "Generating simulated {} data for {}",
            document_type,
            file_name.unwrap_or("unnamed document")
        );

        let profile = document_type.profile();
        let data = (profile.simulate)(&mut self.rng, self.today);
        let confidence_scores = confidence(&mut self.rng, profile.fields);

        SimulatedExtraction {
            data,
            confidence_scores,
        }
    }
}

fn confidence(rng: &mut Rng, fields: &[FieldSpec]) -> ConfidenceScores {
    fields
        .iter()
        .map(|spec| {
            let (floor, span) = if spec.important {
                (0.85, 0.13)
            } else {
                (0.65, 0.25)
            };
            (spec.name.to_string(), floor + rng.f32() * span)
        })
        .collect()
}

fn pick<'a>(rng: &mut Rng, pool: &[&'a str]) -> &'a str {
    pool[rng.usize(..pool.len())]
}

fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    date - Duration::days(days)
}

fn months_after(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

pub(crate) fn utility(rng: &mut Rng, today: NaiveDate) -> ExtractedFields {
    let utility_type = [UtilityType::Electricity, UtilityType::Gas, UtilityType::Water][rng.usize(..3)];

    // Usage range, rate range in ten-thousandths, meter prefix
    let (usage, rate, prefix) = match utility_type {
        UtilityType::Electricity => (rng.i64(150..=900), rng.i64(1500..=3500), "EM"),
        UtilityType::Gas => (rng.i64(40..=300), rng.i64(6000..=14000), "GM"),
        UtilityType::Water | UtilityType::Other => (rng.i64(1500..=6000), rng.i64(40..=120), "WM"),
    };
    let usage_quantity = Decimal::from(usage);
    let rate = Decimal::new(rate, 4);
    let standing_charge = Decimal::new(rng.i64(800..=2000), 2);
    let usage_unit = utility_type.default_unit().to_string();

    let period_end = days_before(today, rng.i64(8..=30));
    let period_start = days_before(period_end, rng.i64(28..=31));
    let bill_date = period_end + Duration::days(rng.i64(1..=7));

    ExtractedFields::Utility(UtilityFields {
        utility_type,
        bill_date,
        period_start,
        period_end,
        total_amount: (usage_quantity * rate + standing_charge).round_dp(2),
        usage_quantity,
        rate_information: format!("${} per {}", rate.normalize(), usage_unit),
        usage_unit,
        meter_reference: format!("{prefix}{:08}", rng.u32(..100_000_000)),
    })
}

pub(crate) fn lease(rng: &mut Rng, today: NaiveDate) -> ExtractedFields {
    let term_months = [12, 24, 36, 60][rng.usize(..4)];
    let start_date = days_before(today, rng.i64(0..=365));
    let end_date = months_after(start_date, term_months);
    let notice_date = months_before(end_date, 6);

    let payment_frequency = [
        PaymentFrequency::Monthly,
        PaymentFrequency::Quarterly,
        PaymentFrequency::Annually,
    ][rng.usize(..3)];
    let monthly_rent = Decimal::from(rng.i64(32..=140) * 25);
    let rental_value = match payment_frequency {
        PaymentFrequency::Monthly => monthly_rent,
        PaymentFrequency::Quarterly => monthly_rent * Decimal::from(3),
        PaymentFrequency::Annually => monthly_rent * Decimal::from(12),
    };

    ExtractedFields::Lease(LeaseFields {
        tenant_name: pick(rng, TENANT_NAMES).to_string(),
        landlord_name: pick(rng, LANDLORD_NAMES).to_string(),
        property_address: pick(rng, STREET_ADDRESSES).to_string(),
        start_date,
        end_date,
        rental_value,
        payment_frequency,
        deposit_amount: (rental_value * Decimal::new(15, 1)).round_dp(2),
        break_clause: rng.bool(),
        notice_date,
    })
}

pub(crate) fn service_charge(rng: &mut Rng, today: NaiveDate) -> ExtractedFields {
    let budget_year = today.year();
    let period_start = NaiveDate::from_ymd_opt(budget_year, 1, 1).unwrap_or(today);
    let period_end = NaiveDate::from_ymd_opt(budget_year, 12, 31).unwrap_or(today);
    let total_budget = Decimal::new(rng.i64(2_000_000..=15_000_000), 2);

    ExtractedFields::ServiceCharge(ServiceChargeFields {
        property_name: pick(rng, PROPERTY_NAMES).to_string(),
        budget_year,
        total_budget,
        period_start,
        period_end,
        category_breakdown: split_budget(rng, total_budget),
        unit_costs: apportion_units(rng, total_budget),
    })
}

/// Random weighted split of `total`; the last line absorbs rounding so the sum is exact.
fn split_budget(rng: &mut Rng, total: Decimal) -> Vec<BudgetCategory> {
    let mut names = BUDGET_CATEGORIES.to_vec();
    rng.shuffle(&mut names);
    names.truncate(rng.usize(5..=names.len()));

    let weights: Vec<i64> = names.iter().map(|_| rng.i64(1..=10)).collect();
    let weight_sum = Decimal::from(weights.iter().sum::<i64>());

    let mut allocated = Decimal::ZERO;
    let last = names.len() - 1;
    names
        .into_iter()
        .zip(weights)
        .enumerate()
        .map(|(i, (name, weight))| {
            let amount = if i == last {
                total - allocated
            } else {
                (total * Decimal::from(weight) / weight_sum).round_dp(2)
            };
            allocated += amount;
            BudgetCategory {
                name: name.to_string(),
                amount,
            }
        })
        .collect()
}

/// Per-unit costs proportional to the unit weights, so that Σ(count × cost) tracks `total`.
fn apportion_units(rng: &mut Rng, total: Decimal) -> Vec<UnitCost> {
    let counts: Vec<u32> = UNIT_WEIGHTS.iter().map(|_| rng.u32(2..=20)).collect();
    let weighted_units: i64 = UNIT_WEIGHTS
        .iter()
        .zip(&counts)
        .map(|((_, weight), count)| weight * i64::from(*count))
        .sum();
    let weighted_units = Decimal::from(weighted_units);

    UNIT_WEIGHTS
        .iter()
        .zip(counts)
        .map(|((unit_type, weight), unit_count)| UnitCost {
            unit_type: unit_type.to_string(),
            unit_count,
            unit_cost: (total * Decimal::from(*weight) / weighted_units).round_dp(2),
        })
        .collect()
}

pub(crate) fn compliance(rng: &mut Rng, today: NaiveDate) -> ExtractedFields {
    let document_subtype =
        ComplianceSubtype::DETECTION_ORDER[rng.usize(..ComplianceSubtype::DETECTION_ORDER.len())];
    let issue_date = days_before(today, rng.i64(0..=300));
    let expiry_date = months_after(issue_date, document_subtype.validity_months());

    let prefix = match document_subtype {
        ComplianceSubtype::FireSafety => "FRA",
        ComplianceSubtype::Electrical => "EICR",
        ComplianceSubtype::Epc => "EPC",
        ComplianceSubtype::GasSafety => "CP12",
        ComplianceSubtype::Asbestos => "ASB",
        ComplianceSubtype::Other => "CERT",
    };

    ExtractedFields::Compliance(ComplianceFields {
        document_subtype,
        certificate_number: format!("{prefix}-{:06}", rng.u32(..1_000_000)),
        issue_date,
        expiry_date,
        is_compliant: rng.u8(..100) < 85,
        rating: (document_subtype == ComplianceSubtype::Epc)
            .then(|| pick(rng, EPC_BANDS).to_string()),
        inspector_name: pick(rng, INSPECTOR_NAMES).to_string(),
        property_address: pick(rng, STREET_ADDRESSES).to_string(),
    })
}
