//! Cross-source fusion and deduplication
//!
//! Merges candidates from every producer into one canonical entity set:
//! filters short noise, removes duplicates under the shared normalization
//! key, and orders the result deterministically.

use crate::domain::Entity;
use crate::text::normalize_key;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Candidates whose trimmed length is below this are discarded before dedup
pub const MIN_ENTITY_CHARS: usize = 3;

/// One detector's contribution to a scan
///
/// Availability is an explicit capability flag: an empty-but-available result
/// is distinguishable from a detector that never ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorOutcome {
    /// Detector name, used in degraded-detection reporting
    pub detector: String,
    /// Whether the detector actually ran
    pub available: bool,
    /// Candidates it produced (empty when unavailable)
    pub candidates: Vec<Entity>,
}

impl DetectorOutcome {
    /// A detector that ran and produced the given candidates
    pub fn available(detector: impl Into<String>, candidates: Vec<Entity>) -> Self {
        Self {
            detector: detector.into(),
            available: true,
            candidates,
        }
    }

    /// A detector that failed or never ran
    pub fn unavailable(detector: impl Into<String>) -> Self {
        Self {
            detector: detector.into(),
            available: false,
            candidates: Vec::new(),
        }
    }
}

/// Fusion and deduplication engine
pub struct FusionEngine {
    min_chars: usize,
}

impl FusionEngine {
    pub fn new() -> Self {
        Self {
            min_chars: MIN_ENTITY_CHARS,
        }
    }

    /// Override the minimum entity length
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars.max(1);
        self
    }

    /// Fuse detector outcomes into the canonical entity list
    ///
    /// Candidates are visited in caller-determined detector order; the
    /// first-seen instance of a normalization key keeps its casing and
    /// metadata. Output is sorted by descending score; equal scores retain
    /// insertion order.
    pub fn fuse(&self, outcomes: &[DetectorOutcome]) -> Vec<Entity> {
        let mut seen = HashSet::new();
        let mut fused: Vec<Entity> = outcomes
            .iter()
            .flat_map(|o| o.candidates.iter())
            .filter(|e| e.len_chars() >= self.min_chars)
            .filter(|e| seen.insert(normalize_key(&e.text)))
            .cloned()
            .collect();

        // Stable sort keeps insertion order within equal scores
        fused.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        fused
    }

    /// Names of detectors that did not run
    pub fn degraded(outcomes: &[DetectorOutcome]) -> Vec<String> {
        outcomes
            .iter()
            .filter(|o| !o.available)
            .map(|o| o.detector.clone())
            .collect()
    }
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntitySource;

    fn entity(text: &str, score: f32, source: EntitySource) -> Entity {
        Entity::new(text, score, source, "unknown")
    }

    #[test]
    fn test_dedup_across_sources_first_seen_wins() {
        let tagger = DetectorOutcome::available(
            "tagger",
            vec![entity("John  Smith", 0.8, EntitySource::Tagger)],
        );
        let rules = DetectorOutcome::available(
            "rules",
            vec![entity("john smith", 0.92, EntitySource::Pattern)],
        );
        let fused = FusionEngine::new().fuse(&[tagger, rules]);
        assert_eq!(fused.len(), 1);
        // First-seen casing and metadata kept
        assert_eq!(fused[0].text, "John Smith");
        assert_eq!(fused[0].source, EntitySource::Tagger);
    }

    #[test]
    fn test_short_candidates_filtered_from_all_sources() {
        let outcome = DetectorOutcome::available(
            "manual",
            vec![
                Entity::manual("JS"),
                Entity::manual("J. Smith"),
            ],
        );
        let fused = FusionEngine::new().fuse(&[outcome]);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].text, "J. Smith");
    }

    #[test]
    fn test_sorted_by_descending_score_stable() {
        let outcome = DetectorOutcome::available(
            "rules",
            vec![
                entity("alpha", 0.9, EntitySource::Pattern),
                entity("bravo", 0.95, EntitySource::Pattern),
                entity("charlie", 0.9, EntitySource::Pattern),
            ],
        );
        let fused = FusionEngine::new().fuse(&[outcome]);
        let texts: Vec<&str> = fused.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["bravo", "alpha", "charlie"]);
    }

    #[test]
    fn test_manual_duplicate_silently_absorbed() {
        let rules = DetectorOutcome::available(
            "rules",
            vec![entity("a@b.org", 0.95, EntitySource::Pattern)],
        );
        let manual = DetectorOutcome::available("manual", vec![Entity::manual("A@B.ORG")]);
        let fused = FusionEngine::new().fuse(&[rules, manual]);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].source, EntitySource::Pattern);
    }

    #[test]
    fn test_manual_entities_sort_first() {
        let rules = DetectorOutcome::available(
            "rules",
            vec![entity("a@b.org", 0.95, EntitySource::Pattern)],
        );
        let manual = DetectorOutcome::available("manual", vec![Entity::manual("Codename Osprey")]);
        let fused = FusionEngine::new().fuse(&[rules, manual]);
        assert_eq!(fused[0].text, "Codename Osprey");
    }

    #[test]
    fn test_degraded_lists_unavailable_detectors() {
        let outcomes = vec![
            DetectorOutcome::available("rules", vec![]),
            DetectorOutcome::unavailable("tagger"),
        ];
        assert_eq!(FusionEngine::degraded(&outcomes), vec!["tagger"]);
    }

    #[test]
    fn test_empty_available_not_degraded() {
        let outcomes = vec![DetectorOutcome::available("tagger", vec![])];
        assert!(FusionEngine::degraded(&outcomes).is_empty());
    }

    #[test]
    fn test_whitespace_insensitive_dedup() {
        let outcome = DetectorOutcome::available(
            "rules",
            vec![
                entity("L PINTO DOS SANTOS", 0.9, EntitySource::Pattern),
                entity("L  PINTO   DOS  SANTOS", 0.9, EntitySource::Pattern),
            ],
        );
        let fused = FusionEngine::new().fuse(&[outcome]);
        assert_eq!(fused.len(), 1);
    }
}
