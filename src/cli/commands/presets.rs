//! Presets command: list the pattern library's document-type presets

use crate::cli::commands::load_engine_config;
use crate::detection::PatternRegistry;
use anyhow::Result;
use clap::Args;

/// Arguments for the presets command
#[derive(Args, Debug)]
pub struct PresetsArgs {}

impl PresetsArgs {
    /// Execute the presets command
    pub async fn execute(&self, config_path: &str) -> Result<i32> {
        let config = load_engine_config(config_path)?;

        let registry = match &config.patterns.library {
            Some(path) => PatternRegistry::from_file(path)?,
            None => PatternRegistry::default_patterns()?,
        };

        println!("Pattern catalog version {}", registry.version());
        println!("{:<20} {:<20} {:>9} {:>9}", "ID", "NAME", "PATTERNS", "KEYWORDS");
        for preset in registry.presets() {
            println!(
                "{:<20} {:<20} {:>9} {:>9}",
                preset.id,
                preset.name,
                preset.patterns.len(),
                preset.keywords.len()
            );
        }

        Ok(0)
    }
}
