//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Blackout using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Blackout - PII detection and redaction planning
#[derive(Parser, Debug)]
#[command(name = "blackout")]
#[command(version, about, long_about = None)]
#[command(author = "Blackout Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "blackout.toml", env = "BLACKOUT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BLACKOUT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a text file and emit the canonical entity list
    Scan(commands::scan::ScanArgs),

    /// Compute redaction regions for rendered pages
    Redact(commands::redact::RedactArgs),

    /// List the pattern library's document-type presets
    Presets(commands::presets::PresetsArgs),

    /// Validate a configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["blackout", "scan", "input.txt"]);
        assert_eq!(cli.config, "blackout.toml");
        assert!(matches!(cli.command, Commands::Scan(_)));
    }

    #[test]
    fn test_cli_parse_scan_with_presets_and_keywords() {
        let cli = Cli::parse_from([
            "blackout",
            "scan",
            "input.txt",
            "--preset",
            "bank-statement",
            "--preset",
            "medical-record",
            "--keyword",
            "project falcon",
        ]);
        if let Commands::Scan(args) = cli.command {
            assert_eq!(args.presets, vec!["bank-statement", "medical-record"]);
            assert_eq!(args.keywords, vec!["project falcon"]);
        } else {
            panic!("expected scan command");
        }
    }

    #[test]
    fn test_cli_parse_redact() {
        let cli = Cli::parse_from([
            "blackout",
            "redact",
            "--entities",
            "entities.json",
            "--spans",
            "spans.json",
        ]);
        assert!(matches!(cli.command, Commands::Redact(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["blackout", "--config", "custom.toml", "presets"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["blackout", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["blackout", "--log-level", "debug", "presets"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }
}
