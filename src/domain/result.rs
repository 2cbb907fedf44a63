//! Result type alias for domain operations

use super::errors::BlackoutError;

/// Result type alias using the domain error type
pub type Result<T> = std::result::Result<T, BlackoutError>;
