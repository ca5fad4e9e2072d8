//! Compliance certificate parser.

use crate::error::ExtractionError;
use crate::extract::entities::{entity_date, extract_text};
use crate::extract::rules::patterns::EPC_RATING;
use crate::extract::rules::{ComplianceHints, capture, compliance};
use crate::extract::schema::tags;
use crate::models::{ComplianceFields, ComplianceSubtype, DocumentType, ExtractedFields, RawDocument};

use super::{FieldResolver, ParseContext, add_months, non_empty, parse_flag};

const DEFAULT_EPC_RATING: &str = "C";

pub fn parse(
    document: &RawDocument,
    ctx: &ParseContext,
) -> Result<ComplianceFields, ExtractionError> {
    let entities = &document.entities;
    let hints = if ctx.regex_fallback {
        compliance::scan(&document.text)
    } else {
        ComplianceHints::default()
    };
    let mut resolver = FieldResolver::new();

    let document_subtype = resolver.resolve(
        ComplianceSubtype::from_label(&extract_text(entities, tags::CERTIFICATE_TYPE)),
        hints.document_subtype,
        || ComplianceSubtype::Other,
    );
    let certificate_number = resolver.resolve(
        non_empty(extract_text(entities, tags::CERTIFICATE_NUMBER)),
        hints.certificate_number,
        || "Unknown".to_string(),
    );

    let issue_date = resolver.resolve(
        entity_date(entities, tags::ISSUE_DATE)?,
        hints.issue_date,
        || ctx.today,
    );
    let expiry_date = resolver.try_resolve(
        entity_date(entities, tags::EXPIRY_DATE)?,
        hints.expiry_date.filter(|expiry| *expiry > issue_date),
        || add_months(issue_date, document_subtype.validity_months(), "expiryDate"),
    )?;

    // Unverified certificates are not reported as compliant.
    let is_compliant = resolver.resolve(
        parse_flag(&extract_text(entities, tags::COMPLIANCE_STATUS)),
        hints.is_compliant,
        || false,
    );

    let rating = if document_subtype == ComplianceSubtype::Epc {
        Some(resolver.resolve(
            energy_rating(&extract_text(entities, tags::ENERGY_RATING)),
            hints.rating,
            || DEFAULT_EPC_RATING.to_string(),
        ))
    } else {
        None
    };

    let inspector_name = resolver.resolve(
        non_empty(extract_text(entities, tags::INSPECTOR_NAME)),
        hints.inspector_name,
        || "Unknown Inspector".to_string(),
    );
    let property_address = resolver.resolve(
        non_empty(extract_text(entities, tags::PROPERTY_ADDRESS)),
        hints.property_address,
        || "Address not found".to_string(),
    );

    resolver.finish(DocumentType::Compliance);

    Ok(ComplianceFields {
        document_subtype,
        certificate_number,
        issue_date,
        expiry_date,
        is_compliant,
        rating,
        inspector_name,
        property_address,
    })
}

pub(crate) fn parse_fields(
    document: &RawDocument,
    ctx: &ParseContext,
) -> Result<ExtractedFields, ExtractionError> {
    parse(document, ctx).map(ExtractedFields::Compliance)
}

/// EPC band letter from a mention such as "C (72)", "Band b" or "Current rating D".
fn energy_rating(mention: &str) -> Option<String> {
    if let Some(band) = capture(&EPC_RATING, mention) {
        return Some(band.to_uppercase());
    }

    mention
        .split(|c: char| !c.is_ascii_alphanumeric())
        .find(|token| matches!(token.as_bytes(), [b] if (b'A'..=b'G').contains(&b.to_ascii_uppercase())))
        .map(|token| token.to_ascii_uppercase())
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
    fn test_epc_expiry_defaults_to_ten_years() {
        let document = RawDocument::new(
            "",
            vec![
                Entity::new(tags::CERTIFICATE_TYPE, "Energy Performance Certificate", 0.9),
                Entity::new(tags::ISSUE_DATE, "3 May 2022", 0.9).with_date(2022, 5, 3),
                Entity::new(tags::ENERGY_RATING, "b (84)", 0.8),
            ],
        );

        let fields = parse(&document, &ctx()).unwrap();
        assert_eq!(fields.document_subtype, ComplianceSubtype::Epc);
        assert_eq!(fields.expiry_date, date(2032, 5, 3));
        assert_eq!(fields.rating.as_deref(), Some("B"));
    }

    #[test]
    fn test_gas_safety_from_text() {
        let text = "LANDLORD GAS SAFETY RECORD\n\
                    Certificate No: GS-778812\n\
                    Engineer: Dan Price\n\
                    Inspection date 10/01/2024\n\
                    All appliances PASS";

        let fields = parse(&RawDocument::from_text(text), &ctx()).unwrap();
        assert_eq!(fields.document_subtype, ComplianceSubtype::GasSafety);
        assert_eq!(fields.certificate_number, "GS-778812");
        assert_eq!(fields.issue_date, date(2024, 1, 10));
        assert_eq!(fields.expiry_date, date(2025, 1, 10));
        assert!(fields.is_compliant);
        assert_eq!(fields.rating, None);
        assert_eq!(fields.inspector_name, "Dan Price");
    }

    #[test]
    fn test_entity_status_overrides_text() {
        let document = RawDocument::new(
            "Report marked satisfactory",
            vec![Entity::new(tags::COMPLIANCE_STATUS, "Unsatisfactory", 0.9)],
        );
        assert!(!parse(&document, &ctx()).unwrap().is_compliant);
    }

    #[test]
    fn test_energy_rating_mentions() {
        assert_eq!(energy_rating("Current rating D").as_deref(), Some("D"));
        assert_eq!(energy_rating("b (84)").as_deref(), Some("B"));
        assert_eq!(energy_rating("Band e").as_deref(), Some("E"));
        assert_eq!(energy_rating("C72").as_deref(), None);
        assert_eq!(energy_rating("").as_deref(), None);
    }

    #[test]
    fn test_defaults() {
        let fields = parse(&RawDocument::from_text(""), &ctx()).unwrap();
        assert_eq!(fields.document_subtype, ComplianceSubtype::Other);
        assert_eq!(fields.certificate_number, "Unknown");
        assert_eq!(fields.issue_date, date(2024, 6, 15));
        assert_eq!(fields.expiry_date, date(2025, 6, 15));
        assert!(!fields.is_compliant);
        assert_eq!(fields.inspector_name, "Unknown Inspector");
        assert!(ExtractedFields::Compliance(fields).missing_fields().is_empty());
    }

    #[test]
    fn test_epc_without_rating_gets_default_band() {
        let fields = parse(&RawDocument::from_text("EPC for 4 Mill Lane"), &ctx()).unwrap();
        assert_eq!(fields.rating.as_deref(), Some("C"));
        assert_eq!(fields.expiry_date, date(2034, 6, 15));
    }
}
