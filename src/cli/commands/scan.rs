//! Scan command: detect entities in a text file

use crate::cli::commands::load_engine_config;
use crate::detection::{DetectionEngine, DetectorOutcome, ScanRequest, TaggedToken};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// UTF-8 text file to scan
    pub input: PathBuf,

    /// Document-type preset to activate (repeatable); unknown ids are ignored
    #[arg(long = "preset")]
    pub presets: Vec<String>,

    /// Custom keyword redacted verbatim wherever it occurs (repeatable)
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,

    /// Manually added entity (repeatable)
    #[arg(long = "manual")]
    pub manual: Vec<String>,

    /// JSON file with tagger tokens ({text, tag, isBeginningOfSpan, score})
    #[arg(long)]
    pub tagger_tokens: Option<PathBuf>,

    /// File with the raw free-text response of a generative extractor
    #[arg(long)]
    pub extractor_response: Option<PathBuf>,

    /// Write the entity list JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> Result<i32> {
        let config = load_engine_config(config_path)?;
        let engine = DetectionEngine::new(&config)?;

        let text = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read input file {}", self.input.display()))?;

        let mut external = Vec::new();
        if let Some(ref path) = self.tagger_tokens {
            external.push(self.load_tagger_outcome(&engine, path));
        }
        if let Some(ref path) = self.extractor_response {
            external.push(self.load_extractor_outcome(&engine, path));
        }

        let request = ScanRequest {
            text,
            presets: self.presets.clone(),
            custom_keywords: self.keywords.clone(),
            manual: self.manual.clone(),
        };

        let outcome = engine.scan(&request, external);

        let entities_json = serde_json::to_string_pretty(&outcome.entities)
            .context("Failed to serialize entity list")?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, &entities_json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Wrote {} entities to {}", outcome.entities.len(), path.display());
            }
            None => println!("{entities_json}"),
        }

        eprintln!(
            "Scan {}: {} entities in {} ms",
            outcome.scan_id,
            outcome.entities.len(),
            outcome.elapsed_ms
        );
        let mut sources: Vec<_> = outcome.counts_by_source.iter().collect();
        sources.sort();
        for (source, count) in sources {
            eprintln!("  {source:<16} {count}");
        }

        if !outcome.is_complete() {
            eprintln!(
                "WARNING: degraded detection, missing detectors: {}",
                outcome.degraded.join(", ")
            );
            return Ok(3);
        }
        Ok(0)
    }

    fn load_tagger_outcome(&self, engine: &DetectionEngine, path: &PathBuf) -> DetectorOutcome {
        let result = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|raw| {
                serde_json::from_str::<Vec<TaggedToken>>(&raw).map_err(anyhow::Error::from)
            });
        match result {
            Ok(tokens) => engine.adapt_tokens(&tokens),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = ?e, "failed to load tagger tokens");
                DetectorOutcome::unavailable("tagger")
            }
        }
    }

    fn load_extractor_outcome(&self, engine: &DetectionEngine, path: &PathBuf) -> DetectorOutcome {
        match std::fs::read_to_string(path) {
            Ok(raw) => engine.adapt_free_text(&raw),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = ?e, "failed to load extractor response");
                DetectorOutcome::unavailable("extractor")
            }
        }
    }
}
