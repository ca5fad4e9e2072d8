//! Core library for property document field extraction.
//!
//! This crate provides:
//! - Entity accessors over document intelligence output
//! - Text heuristics that fill fields the service did not recognize
//! - Typed parsers and confidence scoring for utility bills, leases, service-charge budgets and
//!   compliance certificates
//! - A simulation generator producing consistent synthetic field sets
//! - An orchestrating pipeline with status tracking and fallback to simulated data

pub mod error;
pub mod extract;
pub mod gateway;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod simulation;
pub mod storage;
pub mod testing;

pub use error::{ExtractionError, GatewayError, PropdocError, Result, StorageError};
pub use extract::{ParseContext, score};
pub use gateway::{DocumentIntelligence, decode_document};
#[cfg(feature = "http")]
pub use gateway::HttpGateway;
pub use models::{
    DocumentType, ErrorResponse, ExtractedFields, ExtractionRequest, ExtractionResponse,
    ExtractionResult, ExtractionStatus, MimeType, PropdocConfig, RawDocument,
};
pub use pipeline::ExtractionPipeline;
pub use registry::DocumentProfile;
pub use simulation::{SimulatedExtraction, SimulationGenerator};
pub use storage::{DocumentSource, ExtractionStore, MemoryStore, StoredDocument};
