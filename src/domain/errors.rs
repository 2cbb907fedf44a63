//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Blackout error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum BlackoutError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Pattern library errors (invalid regex, unknown category, bad TOML)
    #[error("Pattern library error: {0}")]
    PatternLibrary(String),

    /// Detection pipeline errors
    #[error("Detection error: {0}")]
    Detection(String),

    /// Redaction matching errors
    #[error("Redaction error: {0}")]
    Redaction(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for BlackoutError {
    fn from(err: std::io::Error) -> Self {
        BlackoutError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for BlackoutError {
    fn from(err: serde_json::Error) -> Self {
        BlackoutError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BlackoutError {
    fn from(err: toml::de::Error) -> Self {
        BlackoutError::Configuration(format!("TOML parse error: {err}"))
    }
}
