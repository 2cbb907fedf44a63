//! Redaction matching
//!
//! Given the canonical entity set and a page's positioned text, finds every
//! occurrence of each entity and returns geometric regions for an external
//! renderer to black out.

pub mod matcher;
pub mod report;

pub use matcher::{PageIndex, PageMatches, RedactionMatcher};
pub use report::RedactionReport;
