//! Field extraction: entity accessors, text heuristics, typed parsers and confidence scoring.

pub mod confidence;
pub mod entities;
pub mod parsers;
pub mod rules;
pub mod schema;

pub use confidence::score;
pub use entities::{average_confidence, entity_date, extract_date, extract_number, extract_text};
pub use parsers::{ParseContext, Tier, parse};
pub use rules::{FallbackFields, FieldExtractor, scan};
pub use schema::FieldSpec;
