//! Per-field confidence scoring.

use tracing::debug;

use crate::models::{ConfidenceScores, RawDocument};

use super::entities::average_confidence;
use super::schema::FieldSpec;

/// Confidence for every field in `fields`.
///
/// Uses the mean entity confidence for the field's tag, or the field's baseline when the
/// service returned no entity for it.
pub fn score(document: &RawDocument, fields: &[FieldSpec]) -> ConfidenceScores {
    let mut scores = ConfidenceScores::new();
    let mut from_baseline = 0usize;

    for spec in fields {
        let entity_confidence = average_confidence(document, spec.entity_type);
        let value = if entity_confidence > 0.0 {
            entity_confidence
        } else {
            from_baseline += 1;
            spec.baseline
        };
        scores.insert(spec.name.to_string(), value.clamp(0.0, 1.0));
    }

    debug!(
        "Scored {} fields ({} from baseline estimates)",
        fields.len(),
        from_baseline
    );

    scores
}
