//! Detection engine
//!
//! Orchestrates the rule scanner and the external detectors, fuses their
//! outputs into the canonical entity list and records the scan in the audit
//! log.
//!
//! # Architecture
//!
//! The engine coordinates four producers:
//! - **Rule scanner**: universal patterns, name heuristics, presets and
//!   custom keywords over raw text
//! - **Token fusion**: spans reconstructed from an external tagger's tokens
//! - **Free-text adapter**: items parsed from an external extractor's reply
//! - **Manual entities**: operator additions
//!
//! External detectors are awaited before fusion; a failed detector degrades
//! the scan instead of aborting it.

use super::freetext::FreeTextAdapter;
use super::fusion::{DetectorOutcome, FusionEngine};
use super::patterns::PatternRegistry;
use super::rules::RuleScanner;
use super::tokens::{TaggedToken, TokenFusion};
use crate::audit::AuditLogger;
use crate::config::EngineConfig;
use crate::domain::{Entity, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Raw output of an external detector
#[derive(Debug, Clone)]
pub enum DetectorResponse {
    /// Classified sub-word tokens from a statistical tagger
    Tokens(Vec<TaggedToken>),
    /// Free-text reply from a generative extractor
    FreeText(String),
}

/// An external, potentially slow detector
///
/// Implementations wrap whatever runs the model; the engine only sees the
/// response shape. Cancellation is the caller's responsibility.
#[async_trait]
pub trait ExternalDetector: Send + Sync {
    /// Detector name used in degraded-detection reporting
    fn name(&self) -> &str;

    /// Run the detector over the raw text
    async fn run(&self, text: &str) -> anyhow::Result<DetectorResponse>;
}

/// One detection request
#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    /// Raw UTF-8 document text
    pub text: String,
    /// Active preset ids; unknown ids are ignored
    pub presets: Vec<String>,
    /// Operator-supplied keywords, redacted verbatim
    pub custom_keywords: Vec<String>,
    /// Operator-added entities
    pub manual: Vec<String>,
}

/// Canonical result of one scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// Unique scan identifier
    pub scan_id: Uuid,
    /// Canonical, deduplicated entity list in descending score order
    pub entities: Vec<Entity>,
    /// Detectors that did not run; empty means full detection
    pub degraded: Vec<String>,
    /// Entity counts by producer label
    pub counts_by_source: HashMap<String, usize>,
    /// Scan wall time in milliseconds
    pub elapsed_ms: u64,
    /// Completion timestamp
    pub timestamp: DateTime<Utc>,
}

impl ScanOutcome {
    fn new(entities: Vec<Entity>, degraded: Vec<String>, elapsed_ms: u64) -> Self {
        let mut counts_by_source = HashMap::new();
        for entity in &entities {
            *counts_by_source
                .entry(entity.source.label().to_string())
                .or_insert(0) += 1;
        }

        Self {
            scan_id: Uuid::new_v4(),
            entities,
            degraded,
            counts_by_source,
            elapsed_ms,
            timestamp: Utc::now(),
        }
    }

    /// Whether every requested detector contributed
    pub fn is_complete(&self) -> bool {
        self.degraded.is_empty()
    }
}

/// Detection engine
///
/// Thread-safe; the pattern registry is shared, matching is stateless, and a
/// scan mutates nothing. Multiple scans may run concurrently over one engine.
pub struct DetectionEngine {
    registry: Arc<PatternRegistry>,
    scanner: RuleScanner,
    token_fusion: TokenFusion,
    freetext: FreeTextAdapter,
    fusion: FusionEngine,
    audit: Option<AuditLogger>,
}

impl DetectionEngine {
    /// Create an engine from configuration
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let registry = match &config.patterns.library {
            Some(path) => Arc::new(PatternRegistry::from_file(path)?),
            None => Arc::new(PatternRegistry::default_patterns()?),
        };

        let scanner = RuleScanner::new(Arc::clone(&registry))?
            .with_keyword_window(config.detection.keyword_window)
            .with_rule_confidence(config.detection.rule_confidence);

        let audit = if config.audit.enabled {
            Some(
                AuditLogger::new(config.audit.log_path.clone(), config.audit.json_format, true)
                    .map_err(|e| {
                        crate::domain::BlackoutError::Configuration(format!(
                            "audit logger: {e}"
                        ))
                    })?,
            )
        } else {
            None
        };

        Ok(Self {
            registry,
            scanner,
            token_fusion: TokenFusion::new().with_score_floor(config.detection.token_score_floor),
            freetext: FreeTextAdapter::new().with_confidence(config.detection.free_text_confidence),
            fusion: FusionEngine::new().with_min_chars(config.detection.min_entity_chars),
            audit,
        })
    }

    /// The engine's pattern registry
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Adapt pre-collected tagger tokens into a detector outcome
    pub fn adapt_tokens(&self, tokens: &[TaggedToken]) -> DetectorOutcome {
        DetectorOutcome::available("tagger", self.token_fusion.fuse(tokens))
    }

    /// Adapt a pre-collected extractor response into a detector outcome
    pub fn adapt_free_text(&self, raw: &str) -> DetectorOutcome {
        DetectorOutcome::available("extractor", self.freetext.parse(raw))
    }

    /// Scan with pre-collected external detector outcomes
    ///
    /// External outcomes are fused ahead of rule output (statistical-then-
    /// pattern ordering); manual entities join the same dedup pass last.
    pub fn scan(&self, request: &ScanRequest, external: Vec<DetectorOutcome>) -> ScanOutcome {
        let start = Instant::now();

        let mut outcomes = external;
        outcomes.push(DetectorOutcome::available(
            "rules",
            self.scanner
                .scan(&request.text, &request.presets, &request.custom_keywords),
        ));
        outcomes.push(DetectorOutcome::available(
            "manual",
            request
                .manual
                .iter()
                .filter(|s| !s.trim().is_empty())
                .map(Entity::manual)
                .collect(),
        ));

        let entities = self.fusion.fuse(&outcomes);
        let degraded = FusionEngine::degraded(&outcomes);
        if !degraded.is_empty() {
            tracing::warn!(detectors = ?degraded, "scan completed with degraded detection");
        }

        let outcome = ScanOutcome::new(entities, degraded, start.elapsed().as_millis() as u64);

        if let Some(ref audit) = self.audit {
            if let Err(e) = audit.log_scan(
                outcome.scan_id,
                &request.text,
                &outcome.entities,
                &outcome.degraded,
            ) {
                tracing::error!(error = ?e, "failed to write scan audit entry");
            }
        }

        tracing::info!(
            scan_id = %outcome.scan_id,
            entities = outcome.entities.len(),
            elapsed_ms = outcome.elapsed_ms,
            "scan complete"
        );
        outcome
    }

    /// Scan, awaiting every external detector first
    ///
    /// A detector error is converted into an unavailable outcome; fusion
    /// proceeds with whatever succeeded.
    pub async fn scan_with_detectors(
        &self,
        request: &ScanRequest,
        detectors: &[Arc<dyn ExternalDetector>],
    ) -> ScanOutcome {
        let runs = detectors.iter().map(|detector| {
            let text = request.text.clone();
            async move { (detector.name().to_string(), detector.run(&text).await) }
        });

        let mut outcomes = Vec::with_capacity(detectors.len());
        for (name, result) in join_all(runs).await {
            match result {
                Ok(DetectorResponse::Tokens(tokens)) => {
                    outcomes.push(DetectorOutcome::available(
                        name,
                        self.token_fusion.fuse(&tokens),
                    ));
                }
                Ok(DetectorResponse::FreeText(raw)) => {
                    outcomes.push(DetectorOutcome::available(name, self.freetext.parse(&raw)));
                }
                Err(e) => {
                    tracing::warn!(detector = %name, error = ?e, "external detector failed, continuing without it");
                    outcomes.push(DetectorOutcome::unavailable(name));
                }
            }
        }

        self.scan(request, outcomes)
    }
}
