//! Per-document-type dispatch table.
//!
//! Each [`DocumentType`] maps to one profile naming its field schema, parser, text rules and
//! simulator. Adding a document type means adding a variant and a profile here.

use chrono::NaiveDate;
use fastrand::Rng;

use crate::error::ExtractionError;
use crate::extract::parsers::{self, ParseContext};
use crate::extract::rules::{self, FallbackFields};
use crate::extract::schema::{
    COMPLIANCE_FIELDS, FieldSpec, LEASE_FIELDS, SERVICE_CHARGE_FIELDS, UTILITY_FIELDS,
};
use crate::models::{DocumentType, ExtractedFields, RawDocument};
use crate::simulation;

pub type ParseFn = fn(&RawDocument, &ParseContext) -> Result<ExtractedFields, ExtractionError>;
pub type ScanFn = fn(&str) -> FallbackFields;
pub type SimulateFn = fn(&mut Rng, NaiveDate) -> ExtractedFields;

/// Everything that varies by document type.
pub struct DocumentProfile {
    pub document_type: DocumentType,
    pub fields: &'static [FieldSpec],
    pub parse: ParseFn,
    pub scan: ScanFn,
    pub simulate: SimulateFn,
}

static UTILITY: DocumentProfile = DocumentProfile {
    document_type: DocumentType::Utility,
    fields: UTILITY_FIELDS,
    parse: parsers::utility::parse_fields,
    scan: rules::utility::scan_fields,
    simulate: simulation::utility,
};

static LEASE: DocumentProfile = DocumentProfile {
    document_type: DocumentType::Lease,
    fields: LEASE_FIELDS,
    parse: parsers::lease::parse_fields,
    scan: rules::lease::scan_fields,
    simulate: simulation::lease,
};

static SERVICE_CHARGE: DocumentProfile = DocumentProfile {
    document_type: DocumentType::ServiceCharge,
    fields: SERVICE_CHARGE_FIELDS,
    parse: parsers::service_charge::parse_fields,
    scan: rules::service_charge::scan_fields,
    simulate: simulation::service_charge,
};

static COMPLIANCE: DocumentProfile = DocumentProfile {
    document_type: DocumentType::Compliance,
    fields: COMPLIANCE_FIELDS,
    parse: parsers::compliance::parse_fields,
    scan: rules::compliance::scan_fields,
    simulate: simulation::compliance,
};

impl DocumentType {
    pub fn profile(self) -> &'static DocumentProfile {
        match self {
            Self::Utility => &UTILITY,
            Self::Lease => &LEASE,
            Self::ServiceCharge => &SERVICE_CHARGE,
            Self::Compliance => &COMPLIANCE,
        }
    }
}

impl std::fmt::Debug for DocumentProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentProfile")
            .field("document_type", &self.document_type)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}
