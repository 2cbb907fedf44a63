//! Detected entity data models

use serde::{Deserialize, Serialize};

/// Default confidence attached to rule-based (pattern and keyword) matches
pub const RULE_CONFIDENCE: f32 = 0.92;

/// Default confidence attached to free-text extractor candidates
pub const FREE_TEXT_CONFIDENCE: f32 = 0.85;

/// Default confidence attached to name heuristics
pub const NAME_HEURISTIC_CONFIDENCE: f32 = 0.75;

/// Confidence attached to operator-added entities
pub const MANUAL_CONFIDENCE: f32 = 1.0;

/// Producer that emitted a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntitySource {
    /// Regular-expression match (universal battery or preset pattern)
    Pattern,
    /// Keyword trigger: a context-extracted value or a verbatim custom keyword
    Keyword,
    /// Statistical token-tagger span
    Tagger,
    /// Name-shape heuristic
    HeuristicName,
    /// Generative extractor free-text item
    FreeText,
    /// Operator-added
    Manual,
}

impl EntitySource {
    /// Human-readable label for reports and audit entries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Keyword => "keyword",
            Self::Tagger => "tagger",
            Self::HeuristicName => "heuristic-name",
            Self::FreeText => "free-text",
            Self::Manual => "manual",
        }
    }
}

/// A detected candidate span of sensitive text
///
/// Entities are immutable once emitted into the fusion stage; a full re-scan
/// discards and recreates the entire set. Every producer emits the full
/// record — a bare string never crosses an internal boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The exact substring to redact (non-empty, trimmed)
    pub text: String,
    /// Confidence score in [0, 1]
    pub score: f32,
    /// Producer that emitted this candidate
    pub source: EntitySource,
    /// Coarse category (e.g. "person", "email", "unknown") — informational
    /// only, never used for matching
    pub kind: String,
}

impl Entity {
    /// Create a new entity, normalizing the text and kind at ingestion
    ///
    /// Empty text and out-of-range scores are programmer errors.
    pub fn new(
        text: impl Into<String>,
        score: f32,
        source: EntitySource,
        kind: impl Into<String>,
    ) -> Self {
        let text = text.into().trim().to_string();
        debug_assert!(!text.is_empty(), "entity text must be non-empty");
        debug_assert!(
            (0.0..=1.0).contains(&score),
            "entity score must be in [0, 1], got {score}"
        );

        Self {
            text,
            score: score.clamp(0.0, 1.0),
            source,
            kind: kind.into().trim().to_lowercase(),
        }
    }

    /// Create an operator-added entity (score 1.0, source `manual`)
    pub fn manual(text: impl Into<String>) -> Self {
        Self::new(text, MANUAL_CONFIDENCE, EntitySource::Manual, "unknown")
    }

    /// Character length of the entity text
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_trims_text() {
        let entity = Entity::new("  John Smith  ", 0.9, EntitySource::Pattern, "person");
        assert_eq!(entity.text, "John Smith");
    }

    #[test]
    fn test_entity_normalizes_kind() {
        let entity = Entity::new("x@y.com", 0.9, EntitySource::Pattern, " EMAIL ");
        assert_eq!(entity.kind, "email");
    }

    #[test]
    fn test_manual_entity() {
        let entity = Entity::manual("Project Falcon");
        assert_eq!(entity.score, 1.0);
        assert_eq!(entity.source, EntitySource::Manual);
    }

    #[test]
    fn test_score_clamped_in_release() {
        // debug_assert catches this in dev; release builds clamp
        if cfg!(not(debug_assertions)) {
            let entity = Entity::new("abc", 1.5, EntitySource::Manual, "unknown");
            assert_eq!(entity.score, 1.0);
        }
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(EntitySource::HeuristicName.label(), "heuristic-name");
        assert_eq!(EntitySource::FreeText.label(), "free-text");
    }

    #[test]
    fn test_entity_serde_roundtrip() {
        let entity = Entity::new("12345678", 0.92, EntitySource::Keyword, "account-number");
        let json = serde_json::to_string(&entity).unwrap();
        assert!(json.contains("\"keyword\""));
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entity);
    }
}
