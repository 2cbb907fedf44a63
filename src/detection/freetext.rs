//! Free-text extraction adapter
//!
//! Parses the loosely-structured list returned by an external generative
//! extractor into candidate strings, stripping list and markup noise. The
//! adapter performs no validation of content; downstream deduplication is
//! the sole correctness backstop.

use crate::domain::{Entity, EntitySource, FREE_TEXT_CONFIDENCE};
use regex::Regex;

/// Designated "no results" sentinel the extractor is prompted to return
pub const NO_RESULTS_SENTINEL: &str = "NO_PII_FOUND";

/// Negative-result phrases discarded outright (compared on the lowercased,
/// trimmed item)
const NEGATIVE_PHRASES: &[&str] = &[
    "no pii",
    "no pii found",
    "none",
    "none found",
    "no results",
    "no personally identifiable information",
    "nothing found",
    "n/a",
];

/// Adapter from raw extractor responses to candidates
pub struct FreeTextAdapter {
    confidence: f32,
    list_marker: Regex,
}

impl FreeTextAdapter {
    pub fn new() -> Self {
        Self {
            confidence: FREE_TEXT_CONFIDENCE,
            // Leading bullets or enumerations: "- ", "• ", "* ", "1. ", "2) "
            list_marker: Regex::new(r"^(?:[-•*]+|\d+[.)])\s*")
                .expect("list marker pattern compiles"),
        }
    }

    /// Override the confidence attached to free-text candidates
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Parse a raw extractor response into candidates
    pub fn parse(&self, raw: &str) -> Vec<Entity> {
        raw.split(['\n', ','])
            .filter_map(|item| self.clean_item(item))
            .map(|text| Entity::new(text, self.confidence, EntitySource::FreeText, "unknown"))
            .collect()
    }

    /// Strip list noise from one item; `None` discards it
    fn clean_item(&self, item: &str) -> Option<String> {
        let stripped = self.list_marker.replace(item.trim(), "");
        let unquoted = strip_wrapping_quotes(stripped.trim());
        let value = unquoted.trim();

        if value.is_empty() || value == NO_RESULTS_SENTINEL {
            return None;
        }
        if NEGATIVE_PHRASES.contains(&value.to_lowercase().as_str()) {
            return None;
        }
        // Bare category labels like "Names:" carry no value
        if value.ends_with(':') {
            return None;
        }

        Some(value.to_string())
    }
}

impl Default for FreeTextAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove one layer of symmetric wrapping quotes
fn strip_wrapping_quotes(s: &str) -> &str {
    for (open, close) in [('"', '"'), ('\'', '\''), ('“', '”'), ('`', '`')] {
        if s.len() >= 2 && s.starts_with(open) && s.ends_with(close) {
            let mut chars = s.chars();
            chars.next();
            chars.next_back();
            return chars.as_str();
        }
    }
    s
}
