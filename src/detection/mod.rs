//! Entity detection pipeline
//!
//! Independent, imprecise producers feed one fusion pass:
//! - [`rules`] — pattern battery, presets, keyword context, custom keywords
//! - [`tokens`] — span reconstruction from statistical tagger tokens
//! - [`freetext`] — parsing of generative extractor replies
//! - [`fusion`] — cross-source dedup into the canonical entity list
//! - [`engine`] — orchestration, external detector seam, audit

pub mod engine;
pub mod freetext;
pub mod fusion;
pub mod names;
pub mod patterns;
pub mod rules;
pub mod tokens;

pub use engine::{DetectionEngine, DetectorResponse, ExternalDetector, ScanOutcome, ScanRequest};
pub use fusion::{DetectorOutcome, FusionEngine};
pub use patterns::{PatternRegistry, Preset};
pub use rules::RuleScanner;
pub use tokens::{TaggedToken, TokenFusion};
