// Blackout - PII Detection and Redaction Planning Engine
// Copyright (c) 2025 Blackout Contributors
// Licensed under the MIT License

//! # Blackout - PII Detection Fusion & Redaction Matching
//!
//! Blackout locates personally-identifiable text spans inside a document and
//! produces a set of geometric matches that a downstream renderer can redact.
//! Several independent, imprecise detectors run over the same text; their
//! outputs are reconciled into one canonical, deduplicated entity set with
//! confidence and provenance, and each entity is re-located inside the
//! positioned text of a rendered page despite case, whitespace and
//! tokenization differences between detection time and redaction time.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`detection`] - Rule scanning, token fusion, free-text parsing, fusion
//! - [`redaction`] - Page text matching and region geometry
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`audit`] - Hashed-value audit trail
//! - [`logging`] - Structured logging
//! - [`text`] - The shared normalization primitives
//!
//! ## Quick start
//!
//! ```rust
//! use blackout::config::EngineConfig;
//! use blackout::detection::{DetectionEngine, ScanRequest};
//! use blackout::domain::{BoundingBox, PositionedSpan};
//! use blackout::redaction::RedactionMatcher;
//!
//! # fn main() -> anyhow::Result<()> {
//! let engine = DetectionEngine::new(&EngineConfig::default())?;
//!
//! let request = ScanRequest {
//!     text: "Contact Mr. John Smith at john.smith@example.com".to_string(),
//!     presets: vec!["bank-statement".to_string()],
//!     ..Default::default()
//! };
//! let outcome = engine.scan(&request, Vec::new());
//!
//! let spans = vec![PositionedSpan::new(
//!     "john.smith@example.com",
//!     BoundingBox::new(0.0, 0.0, 220.0, 12.0),
//! )];
//! let matches = RedactionMatcher::new().match_page(&outcome.entities, &spans);
//! println!("{} regions to black out", matches.regions.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Degraded detection
//!
//! External detectors (a statistical tagger, a generative extractor) are
//! awaited before fusion. A detector that fails degrades the scan instead of
//! aborting it, and [`detection::ScanOutcome::degraded`] names what is
//! missing — an empty-but-available detector result is not degradation.
//!
//! ## Preview/commit equivalence
//!
//! Preview highlighting and commit-time matching share one search path and
//! one normalization function; any divergence between what the operator saw
//! highlighted and what is covered by the output regions is a regression.

pub mod audit;
pub mod cli;
pub mod config;
pub mod detection;
pub mod domain;
pub mod logging;
pub mod redaction;
pub mod text;
