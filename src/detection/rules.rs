//! Rule-based candidate scanner
//!
//! Applies the universal pattern battery, name heuristics, the active
//! presets' patterns and keyword-context extraction, and verbatim
//! custom-keyword occurrences to raw text. Output is deduplicated within
//! this component only; cross-source deduplication happens in fusion.

use super::names::NameHeuristics;
use super::patterns::{is_stop_word, PatternRegistry, Preset};
use crate::domain::{Entity, EntitySource, Result, RULE_CONFIDENCE};
use crate::text::normalize_key;
use regex::RegexBuilder;
use std::collections::HashSet;
use std::sync::Arc;

/// Minimum character length for preset pattern matches
const PRESET_MATCH_MIN_CHARS: usize = 3;

/// Minimum character length for this component's output
const OUTPUT_MIN_CHARS: usize = 2;

/// Characters that terminate a keyword-context value capture
const VALUE_DELIMITERS: [char; 5] = [':', '=', '\n', ',', ';'];

/// Rule-based scanner over raw text
pub struct RuleScanner {
    registry: Arc<PatternRegistry>,
    heuristics: NameHeuristics,
    /// Number of characters inspected after a keyword occurrence
    keyword_window: usize,
    rule_confidence: f32,
}

impl RuleScanner {
    /// Create a scanner over a shared pattern registry
    pub fn new(registry: Arc<PatternRegistry>) -> Result<Self> {
        Ok(Self {
            registry,
            heuristics: NameHeuristics::new()?,
            keyword_window: 100,
            rule_confidence: RULE_CONFIDENCE,
        })
    }

    /// Override the keyword-context window size
    pub fn with_keyword_window(mut self, window: usize) -> Self {
        self.keyword_window = window;
        self
    }

    /// Override the confidence attached to rule matches
    pub fn with_rule_confidence(mut self, confidence: f32) -> Self {
        self.rule_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Scan raw text for candidates
    ///
    /// Unknown preset ids are skipped silently; malformed input text never
    /// causes an error.
    pub fn scan(
        &self,
        text: &str,
        active_presets: &[String],
        custom_keywords: &[String],
    ) -> Vec<Entity> {
        let mut candidates = Vec::new();

        // Universal battery: every pattern applied independently, overlapping
        // matches from different patterns all retained at this stage
        for pattern in self.registry.universal() {
            for m in pattern.regex.find_iter(text) {
                if !m.as_str().trim().is_empty() {
                    candidates.push(Entity::new(
                        m.as_str(),
                        pattern.confidence,
                        EntitySource::Pattern,
                        pattern.kind.as_str(),
                    ));
                }
            }
        }

        // Operator-supplied keywords ahead of heuristics: on a key collision
        // the first-seen provenance wins
        for keyword in custom_keywords {
            self.scan_custom_keyword(text, keyword, &mut candidates);
        }

        candidates.extend(self.heuristics.extract(text));

        for preset_id in active_presets {
            match self.registry.preset(preset_id) {
                Some(preset) => self.scan_preset(text, preset, &mut candidates),
                None => {
                    tracing::debug!(preset = %preset_id, "unknown preset id, skipping");
                }
            }
        }

        dedup_candidates(candidates)
    }

    /// Apply one preset's patterns and keyword-context extraction
    fn scan_preset(&self, text: &str, preset: &Preset, out: &mut Vec<Entity>) {
        for pattern in &preset.patterns {
            for m in pattern.regex.find_iter(text) {
                let matched = m.as_str().trim();
                if matched.chars().count() >= PRESET_MATCH_MIN_CHARS {
                    out.push(Entity::new(
                        matched,
                        preset.confidence,
                        EntitySource::Pattern,
                        pattern.kind.as_str(),
                    ));
                }
            }
        }

        for keyword in &preset.keywords {
            for value in self.extract_keyword_values(text, keyword) {
                out.push(Entity::new(
                    value,
                    self.rule_confidence,
                    EntitySource::Keyword,
                    keyword.as_str(),
                ));
            }
        }
    }

    /// Keyword-context extraction: for every occurrence of the keyword, take
    /// the following window, capture the token run up to the next delimiter,
    /// and treat the trimmed capture as the value the keyword labels
    fn extract_keyword_values(&self, text: &str, keyword: &str) -> Vec<String> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Vec::new();
        }

        let finder = match RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            // An escaped literal always compiles; guard anyway
            Err(_) => return Vec::new(),
        };

        let mut values = Vec::new();
        for occurrence in finder.find_iter(text) {
            let window: String = text[occurrence.end()..]
                .chars()
                .take(self.keyword_window)
                .collect();
            let after_label =
                window.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '=' | '#'));
            let captured: String = after_label
                .chars()
                .take_while(|c| !VALUE_DELIMITERS.contains(c))
                .collect();
            let value = captured.trim().trim_end_matches(['.', ':']).trim();

            if value.chars().count() > 2
                && !value.eq_ignore_ascii_case(keyword)
                && !is_stop_word(value)
            {
                values.push(value.to_string());
            }
        }
        values
    }

    /// Custom keywords are redacted verbatim: every case-preserved occurrence
    /// becomes its own candidate
    fn scan_custom_keyword(&self, text: &str, keyword: &str, out: &mut Vec<Entity>) {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return;
        }

        let finder = match RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(_) => return,
        };

        for m in finder.find_iter(text) {
            out.push(Entity::new(
                m.as_str(),
                self.rule_confidence,
                EntitySource::Keyword,
                "custom-keyword",
            ));
        }
    }
}

/// Component-local dedup: same normalized string collapses to the first
/// occurrence; output filtered to length ≥ 2
fn dedup_candidates(candidates: Vec<Entity>) -> Vec<Entity> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|e| e.len_chars() >= OUTPUT_MIN_CHARS)
        .filter(|e| seen.insert(normalize_key(&e.text)))
        .collect()
}
