//! Utility bill parser.

use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::extract::entities::{entity_date, extract_number, extract_text};
use crate::extract::rules::{UtilityHints, utility};
use crate::extract::schema::tags;
use crate::models::{DocumentType, ExtractedFields, RawDocument, UtilityFields, UtilityType};

use super::{FieldResolver, ParseContext, non_empty, sub_months};

pub fn parse(document: &RawDocument, ctx: &ParseContext) -> Result<UtilityFields, ExtractionError> {
    let entities = &document.entities;
    let hints = if ctx.regex_fallback {
        utility::scan(&document.text)
    } else {
        UtilityHints::default()
    };
    let mut resolver = FieldResolver::new();

    let utility_type = resolver.resolve(
        UtilityType::from_label(&extract_text(entities, tags::UTILITY_TYPE)),
        hints.utility_type,
        || UtilityType::Other,
    );

    let period_end = resolver.resolve(
        entity_date(entities, tags::PERIOD_END)?,
        hints.period_end,
        || ctx.today,
    );
    // One calendar month before the resolved end keeps the period ordered.
    let period_start = resolver.try_resolve(
        entity_date(entities, tags::PERIOD_START)?,
        hints.period_start,
        || sub_months(period_end, 1, "periodStart"),
    )?;
    let bill_date = resolver.resolve(
        entity_date(entities, tags::INVOICE_DATE)?,
        hints.bill_date,
        || period_end,
    );

    let total_amount = resolver.resolve(
        extract_number(entities, tags::TOTAL_AMOUNT),
        hints.total_amount,
        || Decimal::ZERO,
    );
    let usage_quantity = resolver.resolve(
        extract_number(entities, tags::USAGE_QUANTITY),
        hints.usage_quantity,
        || Decimal::ZERO,
    );
    let usage_unit = resolver.resolve(
        non_empty(extract_text(entities, tags::USAGE_UNIT)),
        hints.usage_unit,
        || utility_type.default_unit().to_string(),
    );
    let meter_reference = resolver.resolve(
        non_empty(extract_text(entities, tags::METER_NUMBER)),
        hints.meter_reference,
        || "Unknown".to_string(),
    );
    let rate_information = resolver.resolve(
        non_empty(extract_text(entities, tags::RATE)),
        hints.rate_information,
        || "Standard rate".to_string(),
    );

    resolver.finish(DocumentType::Utility);

    Ok(UtilityFields {
        utility_type,
        bill_date,
        period_start,
        period_end,
        total_amount,
        usage_quantity,
        usage_unit,
        meter_reference,
        rate_information,
    })
}

pub(crate) fn parse_fields(
    document: &RawDocument,
    ctx: &ParseContext,
) -> Result<ExtractedFields, ExtractionError> {
    parse(document, ctx).map(ExtractedFields::Utility)
}
