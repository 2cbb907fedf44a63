//! Configuration management
//!
//! TOML-based configuration with `${VAR}` environment substitution,
//! `BLACKOUT_*` environment overrides and validation.
//!
//! # Example configuration
//!
//! ```toml
//! [detection]
//! rule_confidence = 0.92
//! token_score_floor = 0.5
//! min_entity_chars = 3
//! keyword_window = 100
//!
//! [patterns]
//! library = "patterns/pii_patterns.toml"
//!
//! [audit]
//! enabled = true
//! log_path = "./audit/blackout.log"
//!
//! [logging]
//! local_enabled = false
//! local_path = "./logs"
//! ```

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Detection tuning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Confidence attached to rule (pattern/keyword) matches
    #[serde(default = "default_rule_confidence")]
    pub rule_confidence: f32,

    /// Confidence attached to free-text extractor candidates
    #[serde(default = "default_free_text_confidence")]
    pub free_text_confidence: f32,

    /// Floor below which tagger tokens are dropped
    #[serde(default = "default_token_score_floor")]
    pub token_score_floor: f32,

    /// Minimum entity length kept by fusion
    #[serde(default = "default_min_entity_chars")]
    pub min_entity_chars: usize,

    /// Characters inspected after a keyword occurrence
    #[serde(default = "default_keyword_window")]
    pub keyword_window: usize,
}

fn default_rule_confidence() -> f32 {
    0.92
}

fn default_free_text_confidence() -> f32 {
    0.85
}

fn default_token_score_floor() -> f32 {
    0.5
}

fn default_min_entity_chars() -> usize {
    3
}

fn default_keyword_window() -> usize {
    100
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            rule_confidence: default_rule_confidence(),
            free_text_confidence: default_free_text_confidence(),
            token_score_floor: default_token_score_floor(),
            min_entity_chars: default_min_entity_chars(),
            keyword_window: default_keyword_window(),
        }
    }
}

/// Pattern library configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternsConfig {
    /// Path to an external pattern catalog; the embedded catalog is used
    /// when unset
    pub library: Option<PathBuf>,
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/blackout.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for rotated log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: "daily" or "hourly"
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default)]
    pub patterns: PatternsConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// Performs `${VAR}` environment substitution, applies `BLACKOUT_*`
    /// overrides and validates the result.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

        let substituted = substitute_env_vars(&contents)?;
        let mut config: EngineConfig = toml::from_str(&substituted)
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("BLACKOUT_RULE_CONFIDENCE") {
            self.detection.rule_confidence = val
                .parse()
                .context("Invalid BLACKOUT_RULE_CONFIDENCE value")?;
        }
        if let Ok(val) = std::env::var("BLACKOUT_TOKEN_SCORE_FLOOR") {
            self.detection.token_score_floor = val
                .parse()
                .context("Invalid BLACKOUT_TOKEN_SCORE_FLOOR value")?;
        }
        if let Ok(val) = std::env::var("BLACKOUT_MIN_ENTITY_CHARS") {
            self.detection.min_entity_chars = val
                .parse()
                .context("Invalid BLACKOUT_MIN_ENTITY_CHARS value")?;
        }
        if let Ok(val) = std::env::var("BLACKOUT_PATTERN_LIBRARY") {
            self.patterns.library = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("BLACKOUT_AUDIT_ENABLED") {
            self.audit.enabled = val.parse().context("Invalid BLACKOUT_AUDIT_ENABLED value")?;
        }
        if let Ok(val) = std::env::var("BLACKOUT_AUDIT_LOG_PATH") {
            self.audit.log_path = PathBuf::from(val);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("detection.rule_confidence", self.detection.rule_confidence),
            (
                "detection.free_text_confidence",
                self.detection.free_text_confidence,
            ),
            (
                "detection.token_score_floor",
                self.detection.token_score_floor,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{name} must be in [0, 1], got {value}");
            }
        }

        if self.detection.min_entity_chars == 0 {
            anyhow::bail!("detection.min_entity_chars must be at least 1");
        }
        if self.detection.keyword_window < 10 {
            anyhow::bail!("detection.keyword_window must be at least 10");
        }

        if let Some(ref path) = self.patterns.library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        Ok(())
    }
}

/// Substitute `${VAR_NAME}` references with environment variable values
fn substitute_env_vars(contents: &str) -> Result<String> {
    let var_pattern =
        Regex::new(r"\$\{([A-Z0-9_]+)\}").context("environment substitution pattern")?;

    let mut result = String::with_capacity(contents.len());
    let mut last = 0;
    for caps in var_pattern.captures_iter(contents) {
        let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let value = std::env::var(name)
            .with_context(|| format!("Environment variable {name} referenced but not set"))?;
        result.push_str(&contents[last..whole.0]);
        result.push_str(&value);
        last = whole.1;
    }
    result.push_str(&contents[last..]);
    Ok(result)
}
