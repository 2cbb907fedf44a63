//! Page geometry models for redaction matching
//!
//! A rendered page is represented as an ordered list of [`PositionedSpan`]s.
//! Spans partition the page's visible text without overlap; concatenating
//! their text in reading order reconstructs the page's plain text.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle in page coordinates
///
/// Coordinates follow the renderer's convention: `(x0, y0)` top-left,
/// `(x1, y1)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        debug_assert!(x1 >= x0 && y1 >= y0, "degenerate bounding box");
        Self { x0, y0, x1, y1 }
    }

    /// Smallest box covering both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Horizontal slice of this box between two fractional offsets in [0, 1]
    ///
    /// Used to restrict a span's geometry to the characters a match actually
    /// covers, assuming uniform character advance within the span.
    pub fn hslice(&self, f0: f64, f1: f64) -> BoundingBox {
        let width = self.x1 - self.x0;
        BoundingBox {
            x0: self.x0 + width * f0.clamp(0.0, 1.0),
            y0: self.y0,
            x1: self.x0 + width * f1.clamp(0.0, 1.0),
            y1: self.y1,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// One atomic run of text on a rendered page with its bounding geometry
///
/// Produced by an external page-rendering/text-layout component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedSpan {
    /// The span's text, including any whitespace it carries
    pub text: String,
    /// Bounding geometry of the span
    pub bbox: BoundingBox,
}

impl PositionedSpan {
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// One occurrence of one entity on a page, to be blacked out
///
/// Multiple regions may reference the same entity — every occurrence is
/// redacted. Overlapping regions for the same entity are never deduplicated;
/// rendering idempotently over the same pixels is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRegion {
    /// Index of the entity in the canonical entity list
    pub entity_index: usize,
    /// The entity's text, kept resolvable for logging and reporting
    pub text: String,
    /// Geometry to black out
    pub bbox: BoundingBox,
}
