//! Service-charge budget parser.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::extract::entities::{entity_date, extract_number, extract_text};
use crate::extract::rules::patterns::{BUDGET_ENTITY, UNIT_COST_ENTITY, YEAR};
use crate::extract::rules::{ServiceChargeHints, capture, parse_amount, service_charge};
use crate::extract::schema::tags;
use crate::models::{
    BudgetCategory, DocumentType, Entity, ExtractedFields, RawDocument, ServiceChargeFields,
    UnitCost,
};

use super::{FieldResolver, ParseContext, add_months, non_empty};

const GENERAL_CATEGORY: &str = "General";

pub fn parse(
    document: &RawDocument,
    ctx: &ParseContext,
) -> Result<ServiceChargeFields, ExtractionError> {
    let entities = &document.entities;
    let hints = if ctx.regex_fallback {
        service_charge::scan(&document.text)
    } else {
        ServiceChargeHints::default()
    };
    let mut resolver = FieldResolver::new();

    let property_name = resolver.resolve(
        non_empty(extract_text(entities, tags::PROPERTY_NAME)),
        hints.property_name,
        || "Unknown Property".to_string(),
    );

    let entity_start = entity_date(entities, tags::PERIOD_START)?;
    let known_start = entity_start.or(hints.period_start);
    let budget_year = resolver.resolve(
        capture(&YEAR, &extract_text(entities, tags::BUDGET_YEAR)).and_then(|y| y.parse().ok()),
        hints.budget_year,
        || known_start.map_or(ctx.today.year(), |start| start.year()),
    );

    let period_start = resolver.try_resolve(entity_start, hints.period_start, || {
        NaiveDate::from_ymd_opt(budget_year, 1, 1)
            .ok_or_else(|| ExtractionError::DateOutOfRange("periodStart".to_string()))
    })?;
    let period_end = resolver.try_resolve(
        entity_date(entities, tags::PERIOD_END)?,
        hints.period_end.filter(|end| *end > period_start),
        || {
            add_months(period_start, 12, "periodEnd")?
                .pred_opt()
                .ok_or_else(|| ExtractionError::DateOutOfRange("periodEnd".to_string()))
        },
    )?;

    let entity_categories = budget_categories(entities);
    let hint_categories = hints.categories;
    let known_categories = if entity_categories.is_empty() {
        &hint_categories
    } else {
        &entity_categories
    };
    let total_budget = resolver.try_resolve(
        extract_number(entities, tags::TOTAL_BUDGET),
        hints.total_budget,
        || {
            known_categories
                .iter()
                .try_fold(Decimal::ZERO, |total, c| total.checked_add(c.amount))
                .ok_or_else(|| ExtractionError::AmountOutOfRange("totalBudget".to_string()))
        },
    )?;

    let category_breakdown = resolver.resolve(
        Some(entity_categories).filter(|c| !c.is_empty()),
        Some(hint_categories).filter(|c| !c.is_empty()),
        || {
            vec![BudgetCategory {
                name: GENERAL_CATEGORY.to_string(),
                amount: total_budget,
            }]
        },
    );

    let unit_costs = resolver.resolve(
        Some(unit_costs(entities)).filter(|u| !u.is_empty()),
        None,
        Vec::new,
    );

    resolver.finish(DocumentType::ServiceCharge);

    Ok(ServiceChargeFields {
        property_name,
        budget_year,
        total_budget,
        period_start,
        period_end,
        category_breakdown,
        unit_costs,
    })
}

pub(crate) fn parse_fields(
    document: &RawDocument,
    ctx: &ParseContext,
) -> Result<ExtractedFields, ExtractionError> {
    parse(document, ctx).map(ExtractedFields::ServiceCharge)
}

/// Every `budget_category` entity whose mention reads as a name followed by an amount.
fn budget_categories(entities: &[Entity]) -> Vec<BudgetCategory> {
    entities
        .iter()
        .filter(|e| e.entity_type == tags::BUDGET_CATEGORY)
        .filter_map(|e| {
            let caps = BUDGET_ENTITY.captures(&e.mention_text)?;
            Some(BudgetCategory {
                name: caps[1].trim().to_string(),
                amount: parse_amount(&caps[2])?,
            })
        })
        .collect()
}

fn unit_costs(entities: &[Entity]) -> Vec<UnitCost> {
    entities
        .iter()
        .filter(|e| e.entity_type == tags::UNIT_COST)
        .filter_map(|e| {
            let caps = UNIT_COST_ENTITY.captures(&e.mention_text)?;
            Some(UnitCost {
                unit_type: caps[1].trim().to_string(),
                unit_count: caps[2].parse().ok()?,
                unit_cost: parse_amount(&caps[3])?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx() -> ParseContext {
        ParseContext::new(date(2024, 6, 15))
    }

    fn category(name: &str, amount: Decimal) -> BudgetCategory {
        BudgetCategory {
            name: name.to_string(),
            amount,
        }
    }

    #[test]
    fn test_entity_categories_and_units() {
        let document = RawDocument::new(
            "",
            vec![
                Entity::new(tags::PROPERTY_NAME, "Riverside Court", 0.8),
                Entity::new(tags::BUDGET_YEAR, "FY 2025/26", 0.9),
                Entity::new(tags::BUDGET_CATEGORY, "Cleaning: £12,000.00", 0.7),
                Entity::new(tags::BUDGET_CATEGORY, "Insurance £8,000.00", 0.7),
                Entity::new(tags::UNIT_COST, "Two Bed x 12 @ £1,250.00", 0.6),
            ],
        );

        let fields = parse(&document, &ctx()).unwrap();
        assert_eq!(fields.property_name, "Riverside Court");
        assert_eq!(fields.budget_year, 2025);
        assert_eq!(fields.period_start, date(2025, 1, 1));
        assert_eq!(fields.period_end, date(2025, 12, 31));
        assert_eq!(
            fields.category_breakdown,
            vec![
                category("Cleaning", Decimal::new(1200000, 2)),
                category("Insurance", Decimal::new(800000, 2)),
            ]
        );
        assert_eq!(fields.total_budget, Decimal::new(2000000, 2));
        assert_eq!(
            fields.unit_costs,
            vec![UnitCost {
                unit_type: "Two Bed".to_string(),
                unit_count: 12,
                unit_cost: Decimal::new(125000, 2),
            }]
        );
    }

    #[test]
    fn test_text_budget() {
        let text = "Building: Riverside Court\n\
                    Service Charge Budget Year 2025\n\
                    Cleaning: $12,000.00\n\
                    Insurance: $8,500.50\n\
                    Total Budget: $20,500.50";

        let fields = parse(&RawDocument::from_text(text), &ctx()).unwrap();
        assert_eq!(fields.budget_year, 2025);
        assert_eq!(fields.total_budget, Decimal::new(2050050, 2));
        assert_eq!(fields.category_breakdown.len(), 2);
        assert!(fields.unit_costs.is_empty());
    }

    #[test]
    fn test_year_from_period_start() {
        let document = RawDocument::new(
            "",
            vec![Entity::new(tags::PERIOD_START, "1 April 2023", 0.8).with_date(2023, 4, 1)],
        );

        let fields = parse(&document, &ctx()).unwrap();
        assert_eq!(fields.budget_year, 2023);
        assert_eq!(fields.period_end, date(2024, 3, 31));
    }

    #[test]
    fn test_category_sum_overflow_is_an_error() {
        let document = RawDocument::new(
            "",
            vec![
                Entity::new(tags::BUDGET_CATEGORY, "Cleaning: 79,228,162,514,264,337,593,543,950,335", 0.7),
                Entity::new(tags::BUDGET_CATEGORY, "Insurance: 1,000.00", 0.7),
            ],
        );

        assert!(matches!(
            parse(&document, &ctx()),
            Err(ExtractionError::AmountOutOfRange(ref field)) if field == "totalBudget"
        ));
    }

    #[test]
    fn test_defaults() {
        let fields = parse(&RawDocument::from_text(""), &ctx()).unwrap();
        assert_eq!(fields.property_name, "Unknown Property");
        assert_eq!(fields.budget_year, 2024);
        assert_eq!(fields.period_start, date(2024, 1, 1));
        assert_eq!(fields.period_end, date(2024, 12, 31));
        assert_eq!(fields.total_budget, Decimal::ZERO);
        assert_eq!(fields.category_breakdown, vec![category("General", Decimal::ZERO)]);
        assert!(ExtractedFields::ServiceCharge(fields).missing_fields().is_empty());
    }
}
