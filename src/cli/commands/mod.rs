//! CLI command implementations

pub mod presets;
pub mod redact;
pub mod scan;
pub mod validate;

use crate::config::EngineConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Load the engine configuration, falling back to defaults when the file
/// does not exist
pub(crate) fn load_engine_config(config_path: &str) -> Result<EngineConfig> {
    if Path::new(config_path).exists() {
        EngineConfig::from_file(config_path)
            .with_context(|| format!("Failed to load configuration from {config_path}"))
    } else {
        tracing::debug!(path = %config_path, "configuration file not found, using defaults");
        Ok(EngineConfig::default())
    }
}
