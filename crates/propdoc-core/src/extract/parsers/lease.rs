//! Lease agreement parser.

use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::extract::entities::{entity_date, extract_number, extract_text};
use crate::extract::rules::{LeaseHints, lease};
use crate::extract::schema::tags;
use crate::models::{DocumentType, ExtractedFields, LeaseFields, PaymentFrequency, RawDocument};

use super::{FieldResolver, ParseContext, add_months, non_empty, parse_flag, sub_months};

const DEFAULT_TERM_MONTHS: u32 = 12;
const NOTICE_PERIOD_MONTHS: u32 = 6;
const DEPOSIT_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

pub fn parse(document: &RawDocument, ctx: &ParseContext) -> Result<LeaseFields, ExtractionError> {
    let entities = &document.entities;
    let hints = if ctx.regex_fallback {
        lease::scan(&document.text)
    } else {
        LeaseHints::default()
    };
    let mut resolver = FieldResolver::new();

    let tenant_name = resolver.resolve(
        non_empty(extract_text(entities, tags::TENANT_NAME)),
        hints.tenant_name,
        || "Unknown Tenant".to_string(),
    );
    let landlord_name = resolver.resolve(
        non_empty(extract_text(entities, tags::LANDLORD_NAME)),
        hints.landlord_name,
        || "Unknown Landlord".to_string(),
    );
    let property_address = resolver.resolve(
        non_empty(extract_text(entities, tags::PROPERTY_ADDRESS)),
        hints.property_address,
        || "Address not found".to_string(),
    );

    let start_date = resolver.resolve(
        entity_date(entities, tags::LEASE_START_DATE)?,
        hints.start_date,
        || ctx.today,
    );
    // A single date in the text is the start, not a zero-length term.
    let end_date = resolver.try_resolve(
        entity_date(entities, tags::LEASE_END_DATE)?,
        hints.end_date.filter(|end| *end > start_date),
        || add_months(start_date, DEFAULT_TERM_MONTHS, "endDate"),
    )?;
    let notice_date = resolver.try_resolve(
        entity_date(entities, tags::NOTICE_DATE)?,
        None,
        || sub_months(end_date, NOTICE_PERIOD_MONTHS, "noticeDate"),
    )?;

    let rental_value = resolver.resolve(
        extract_number(entities, tags::RENT_AMOUNT),
        hints.rental_value,
        || Decimal::ZERO,
    );
    let payment_frequency = resolver.resolve(
        PaymentFrequency::from_label(&extract_text(entities, tags::PAYMENT_FREQUENCY)),
        hints.payment_frequency,
        || PaymentFrequency::Monthly,
    );
    let deposit_amount = resolver.try_resolve(
        extract_number(entities, tags::DEPOSIT_AMOUNT),
        hints.deposit_amount,
        || {
            rental_value
                .checked_mul(DEPOSIT_MULTIPLIER)
                .map(|deposit| deposit.round_dp(2))
                .ok_or_else(|| ExtractionError::AmountOutOfRange("depositAmount".to_string()))
        },
    )?;
    let break_clause = resolver.resolve(
        parse_flag(&extract_text(entities, tags::BREAK_CLAUSE)),
        hints.break_clause,
        || false,
    );

    resolver.finish(DocumentType::Lease);

    Ok(LeaseFields {
        tenant_name,
        landlord_name,
        property_address,
        start_date,
        end_date,
        rental_value,
        payment_frequency,
        deposit_amount,
        break_clause,
        notice_date,
    })
}

pub(crate) fn parse_fields(
    document: &RawDocument,
    ctx: &ParseContext,
) -> Result<ExtractedFields, ExtractionError> {
    parse(document, ctx).map(ExtractedFields::Lease)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use crate::models::Entity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx() -> ParseContext {
        ParseContext::new(date(2024, 6, 15))
    }

    #[test]
    fn test_entity_lease() {
        let document = RawDocument::new(
            "",
            vec![
                Entity::new(tags::TENANT_NAME, "Acme Retail Ltd", 0.9),
                Entity::new(tags::LANDLORD_NAME, "Northgate Holdings", 0.9),
                Entity::new(tags::LEASE_START_DATE, "1 March 2023", 0.85).with_date(2023, 3, 1),
                Entity::new(tags::LEASE_END_DATE, "28 Feb 2028", 0.85).with_date(2028, 2, 28),
                Entity::new(tags::RENT_AMOUNT, "£45,000", 0.9),
                Entity::new(tags::PAYMENT_FREQUENCY, "Quarterly in advance", 0.7),
                Entity::new(tags::BREAK_CLAUSE, "Yes", 0.6),
            ],
        );

        let fields = parse(&document, &ctx()).unwrap();
        assert_eq!(fields.tenant_name, "Acme Retail Ltd");
        assert_eq!(fields.end_date, date(2028, 2, 28));
        assert_eq!(fields.notice_date, date(2027, 8, 28));
        assert_eq!(fields.rental_value, Decimal::new(45000, 0));
        assert_eq!(fields.deposit_amount, Decimal::new(67500, 0));
        assert_eq!(fields.payment_frequency, PaymentFrequency::Quarterly);
        assert!(fields.break_clause);
        assert_eq!(fields.property_address, "Address not found");
    }

    #[test]
    fn test_text_lease() {
        let text = "Property: 12 Harbour View, Bristol\n\
                    Landlord: Harbour Estates Ltd, and the Tenant: Sarah Jones.\n\
                    The term runs from 01/06/2024 until 31/05/2025.\n\
                    Monthly rent of £1,250.00.";

        let fields = parse(&RawDocument::from_text(text), &ctx()).unwrap();
        assert_eq!(fields.tenant_name, "Sarah Jones");
        assert_eq!(fields.landlord_name, "Harbour Estates Ltd");
        assert_eq!(fields.start_date, date(2024, 6, 1));
        assert_eq!(fields.end_date, date(2025, 5, 31));
        assert_eq!(fields.rental_value, Decimal::new(125000, 2));
        assert_eq!(fields.deposit_amount, Decimal::new(187500, 2));
        assert!(!fields.break_clause);
    }

    #[test]
    fn test_single_text_date_is_start() {
        let fields = parse(&RawDocument::from_text("Commencing 01/09/2024"), &ctx()).unwrap();
        assert_eq!(fields.start_date, date(2024, 9, 1));
        assert_eq!(fields.end_date, date(2025, 9, 1));
    }

    #[test]
    fn test_deposit_overflow_is_an_error() {
        let document = RawDocument::new(
            "",
            vec![Entity::new(
                tags::RENT_AMOUNT,
                "£79,228,162,514,264,337,593,543,950,335",
                0.9,
            )],
        );

        assert!(matches!(
            parse(&document, &ctx()),
            Err(ExtractionError::AmountOutOfRange(ref field)) if field == "depositAmount"
        ));
    }

    #[test]
    fn test_mixed_term_and_frequency_wording() {
        let text = "Term of 24 months. Rent of £3,000.00 payable quarterly in advance.";
        let fields = parse(&RawDocument::from_text(text), &ctx()).unwrap();
        assert_eq!(fields.payment_frequency, PaymentFrequency::Quarterly);
        assert_eq!(fields.rental_value, Decimal::new(300000, 2));
    }

    #[test]
    fn test_defaults() {
        let fields = parse(&RawDocument::from_text(""), &ctx()).unwrap();
        assert_eq!(fields.tenant_name, "Unknown Tenant");
        assert_eq!(fields.landlord_name, "Unknown Landlord");
        assert_eq!(fields.start_date, date(2024, 6, 15));
        assert_eq!(fields.end_date, date(2025, 6, 15));
        assert_eq!(fields.notice_date, date(2024, 12, 15));
        assert_eq!(fields.payment_frequency, PaymentFrequency::Monthly);
        assert_eq!(fields.deposit_amount, Decimal::ZERO);
        assert!(ExtractedFields::Lease(fields).missing_fields().is_empty());
    }
}
