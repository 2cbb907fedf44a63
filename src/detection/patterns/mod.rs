//! Pattern library for PII detection
//!
//! The library is an immutable, injectable structure compiled once from a
//! versioned TOML catalog. Matching uses stateless match-all calls, so
//! concurrent scans can share a registry through an `Arc` without
//! interference.

use crate::domain::{BlackoutError, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Identifier of the always-empty, operator-populated preset
pub const CUSTOM_PRESET_ID: &str = "custom";

/// Common words never accepted as name candidates or keyword-context values
const STOP_WORDS: &[&str] = &[
    "the", "this", "that", "these", "those", "a", "an", "and", "or", "but", "if", "then", "else",
    "from", "with", "for", "not", "are", "was", "were", "will", "would", "there", "their", "they",
    "has", "have", "had", "been", "when", "where", "which", "who", "whom", "your", "you", "our",
    "his", "her", "him", "she", "its", "it", "per", "each", "all", "any", "new", "old", "dear",
    "sincerely", "regards", "thank", "thanks", "please", "contact", "mr", "mrs", "ms", "miss",
    "dr", "prof", "date", "name", "address", "phone", "email", "account", "number", "total",
    "balance", "amount", "statement", "page", "invoice", "payment", "customer", "reference",
    "description", "details", "summary", "subject", "attention", "attn", "company", "department",
];

/// Check whether every word of a candidate is a stop word, or the candidate
/// itself is one
pub fn is_stop_word(candidate: &str) -> bool {
    let words: Vec<&str> = candidate
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return true;
    }
    words
        .iter()
        .all(|w| STOP_WORDS.contains(&w.to_lowercase().as_str()))
}

/// Check whether a single word is a stop word
pub fn is_stop_word_exact(word: &str) -> bool {
    STOP_WORDS.contains(&word.to_lowercase().as_str())
}

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
struct PatternDefinition {
    /// Regex patterns for this category
    patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    confidence: f32,
    /// Coarse category label
    kind: String,
}

/// Preset definition from TOML
#[derive(Debug, Clone, Deserialize)]
struct PresetDefinition {
    /// Display name
    name: String,
    #[serde(default = "default_preset_confidence")]
    confidence: f32,
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    context_clues: Vec<String>,
}

fn default_preset_confidence() -> f32 {
    0.9
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    version: u32,
    #[serde(default)]
    patterns: BTreeMap<String, PatternDefinition>,
    #[serde(default)]
    presets: BTreeMap<String, PresetDefinition>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Name of the pattern group this regex came from
    pub name: String,
    /// Compiled regex
    pub regex: Regex,
    /// Coarse category
    pub kind: String,
    /// Confidence score
    pub confidence: f32,
}

/// A named document-type profile
#[derive(Debug, Clone)]
pub struct Preset {
    /// Unique preset identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Confidence attached to this preset's pattern matches
    pub confidence: f32,
    /// Ordered preset patterns
    pub patterns: Vec<CompiledPattern>,
    /// Case-insensitive trigger phrases
    pub keywords: Vec<String>,
    /// Informational phrases, never used for matching
    pub context_clues: Vec<String>,
}

/// Pattern registry for PII detection
///
/// Holds the compiled universal battery plus all document-type presets.
pub struct PatternRegistry {
    version: u32,
    universal: Vec<CompiledPattern>,
    presets: BTreeMap<String, Preset>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            BlackoutError::PatternLibrary(format!(
                "Failed to read pattern library {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content)
            .map_err(|e| BlackoutError::PatternLibrary(format!("Failed to parse catalog: {e}")))?;

        let mut universal = Vec::new();
        for (name, def) in &library.patterns {
            for pattern_str in &def.patterns {
                universal.push(Self::compile(name, pattern_str, &def.kind, def.confidence)?);
            }
        }

        let mut presets = BTreeMap::new();
        for (id, def) in &library.presets {
            if id == CUSTOM_PRESET_ID
                && !(def.patterns.is_empty() && def.keywords.is_empty())
            {
                return Err(BlackoutError::PatternLibrary(
                    "The 'custom' preset must not carry built-in patterns or keywords".to_string(),
                ));
            }

            let mut patterns = Vec::new();
            for pattern_str in &def.patterns {
                patterns.push(Self::compile(id, pattern_str, "unknown", def.confidence)?);
            }

            presets.insert(
                id.clone(),
                Preset {
                    id: id.clone(),
                    name: def.name.clone(),
                    confidence: def.confidence,
                    patterns,
                    keywords: def.keywords.clone(),
                    context_clues: def.context_clues.clone(),
                },
            );
        }

        // The custom preset exists even if the catalog omits it
        presets
            .entry(CUSTOM_PRESET_ID.to_string())
            .or_insert_with(|| Preset {
                id: CUSTOM_PRESET_ID.to_string(),
                name: "Custom".to_string(),
                confidence: default_preset_confidence(),
                patterns: Vec::new(),
                keywords: Vec::new(),
                context_clues: Vec::new(),
            });

        Ok(Self {
            version: library.version,
            universal,
            presets,
        })
    }

    /// Create a registry from the embedded default catalog
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    fn compile(name: &str, pattern_str: &str, kind: &str, confidence: f32) -> Result<CompiledPattern> {
        let regex = Regex::new(pattern_str).map_err(|e| {
            BlackoutError::PatternLibrary(format!("Invalid regex in '{name}': {pattern_str}: {e}"))
        })?;
        Ok(CompiledPattern {
            name: name.to_string(),
            regex,
            kind: kind.to_string(),
            confidence,
        })
    }

    /// Catalog version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The universal battery, applied to every scan
    pub fn universal(&self) -> &[CompiledPattern] {
        &self.universal
    }

    /// Look up a preset by id
    pub fn preset(&self, id: &str) -> Option<&Preset> {
        self.presets.get(id)
    }

    /// All presets in deterministic (id) order
    pub fn presets(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }
}
