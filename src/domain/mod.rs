//! Domain models and types
//!
//! The domain layer provides:
//! - **Entity models** ([`Entity`], [`EntitySource`]) — detected candidates
//!   with confidence and provenance
//! - **Page geometry** ([`BoundingBox`], [`PositionedSpan`], [`MatchRegion`])
//! - **Error types** ([`BlackoutError`]) and the [`Result`] alias

pub mod entity;
pub mod errors;
pub mod geometry;
pub mod result;

pub use entity::{
    Entity, EntitySource, FREE_TEXT_CONFIDENCE, MANUAL_CONFIDENCE, NAME_HEURISTIC_CONFIDENCE,
    RULE_CONFIDENCE,
};
pub use errors::BlackoutError;
pub use geometry::{BoundingBox, MatchRegion, PositionedSpan};
pub use result::Result;
