//! Name-extraction heuristics
//!
//! Shape-based extraction of person names: titled forms, labeled forms,
//! "Last, First" forms and bare capitalized word runs. Candidates containing
//! a stop word are rejected even when the shape matches.

use super::patterns::is_stop_word_exact;
use crate::domain::{BlackoutError, Entity, EntitySource, Result, NAME_HEURISTIC_CONFIDENCE};

const PERSON_KIND: &str = "person";

/// Heuristic name extractor
pub struct NameHeuristics {
    titled: regex::Regex,
    last_first: regex::Regex,
    capitalized_run: regex::Regex,
    // Label lookbehind needs fancy-regex; the plain engine has no lookaround
    labeled: fancy_regex::Regex,
}

impl NameHeuristics {
    /// Compile the heuristic patterns
    pub fn new() -> Result<Self> {
        let titled = regex::Regex::new(
            r"\b(?:Mr|Mrs|Ms|Miss|Dr|Prof|Rev)\.?\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})\b",
        )
        .map_err(|e| BlackoutError::Detection(format!("titled-name pattern: {e}")))?;

        let last_first = regex::Regex::new(r"\b[A-Z][a-z]+,\s[A-Z][a-z]+\b")
            .map_err(|e| BlackoutError::Detection(format!("last-first pattern: {e}")))?;

        let capitalized_run = regex::Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,2}\b")
            .map_err(|e| BlackoutError::Detection(format!("capitalized-run pattern: {e}")))?;

        let labeled = fancy_regex::Regex::new(
            r"(?i)(?<=\b(?:name|patient|account holder|customer|beneficiary|applicant|attn)\s*[:=]\s*)(?-i:[A-Z][A-Za-z'\-]+(?:\s+[A-Z][A-Za-z'\-]+){0,3})",
        )
        .map_err(|e| BlackoutError::Detection(format!("labeled-name pattern: {e}")))?;

        Ok(Self {
            titled,
            last_first,
            capitalized_run,
            labeled,
        })
    }

    /// Extract name candidates from raw text
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        let mut candidates = Vec::new();

        for caps in self.titled.captures_iter(text) {
            if let Some(name) = caps.get(1) {
                self.push_candidate(&mut candidates, name.as_str());
            }
        }

        // fancy-regex iteration is fallible; a match error means catastrophic
        // backtracking, which these patterns cannot produce — skip defensively
        for m in self.labeled.find_iter(text).flatten() {
            self.push_candidate(&mut candidates, m.as_str());
        }

        for m in self.last_first.find_iter(text) {
            self.push_candidate(&mut candidates, m.as_str());
        }

        for m in self.capitalized_run.find_iter(text) {
            self.push_candidate(&mut candidates, m.as_str());
        }

        candidates
    }

    fn push_candidate(&self, out: &mut Vec<Entity>, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.chars().count() < 2 || Self::contains_stop_word(trimmed) {
            return;
        }
        out.push(Entity::new(
            trimmed,
            NAME_HEURISTIC_CONFIDENCE,
            EntitySource::HeuristicName,
            PERSON_KIND,
        ));
    }

    /// A name candidate is rejected when any of its words is a common word
    fn contains_stop_word(candidate: &str) -> bool {
        candidate
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty())
            .any(is_stop_word_exact)
    }
}
