//! Data models for property documents and extraction results.

pub mod config;
pub mod document;
pub mod fields;
pub mod result;

pub use config::PropdocConfig;
pub use document::{DateValue, DocumentType, Entity, MimeType, NormalizedValue, RawDocument};
pub use fields::{
    BudgetCategory, ComplianceFields, ComplianceSubtype, ConfidenceScores, ExtractedFields,
    LeaseFields, PaymentFrequency, ServiceChargeFields, UnitCost, UtilityFields, UtilityType,
};
pub use result::{
    ErrorResponse, ExtractionRecord, ExtractionRequest, ExtractionResponse, ExtractionResult,
    ExtractionStatus, StatusRecord,
};
