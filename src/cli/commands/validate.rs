//! Validate-config command

use crate::config::EngineConfig;
use crate::detection::PatternRegistry;
use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> Result<i32> {
        let config = EngineConfig::from_file(config_path)
            .with_context(|| format!("Failed to load configuration from {config_path}"))?;

        // Compiling the catalog surfaces invalid regexes now, not at scan time
        match &config.patterns.library {
            Some(path) => {
                PatternRegistry::from_file(path)?;
            }
            None => {
                PatternRegistry::default_patterns()?;
            }
        }

        println!("Configuration valid: {config_path}");
        Ok(0)
    }
}
