//! Redaction matcher
//!
//! Re-locates each entity's text inside a rendered page and returns the
//! geometric regions to black out. Comparison is whitespace-normalized and
//! case-insensitive, with a stricter exact-case retry when the primary pass
//! finds nothing. Preview highlighting and commit-time matching share the
//! single [`RedactionMatcher::locate`] path, so the two can never diverge.

use crate::domain::{BoundingBox, Entity, MatchRegion, PositionedSpan};
use crate::text::normalize_whitespace;

/// Precomputed search index over one page's positioned spans
///
/// The page's plain text is the concatenation of its spans in reading order;
/// the index keeps a map from normalized character positions back to the
/// original characters and their owning spans.
pub struct PageIndex {
    /// Normalized page text as characters
    norm_chars: Vec<char>,
    /// Normalized character index → original character index
    norm_to_orig: Vec<usize>,
    /// Original character index → owning span index
    span_of_char: Vec<usize>,
    /// Span index → (start, end) original character range
    span_bounds: Vec<(usize, usize)>,
}

impl PageIndex {
    /// Build the index from a page's spans
    pub fn build(spans: &[PositionedSpan]) -> Self {
        let mut page_text = String::new();
        let mut span_of_char = Vec::new();
        let mut span_bounds = Vec::with_capacity(spans.len());

        let mut offset = 0;
        for (idx, span) in spans.iter().enumerate() {
            let len = span.text.chars().count();
            span_bounds.push((offset, offset + len));
            span_of_char.extend(std::iter::repeat(idx).take(len));
            page_text.push_str(&span.text);
            offset += len;
        }

        let normalized = normalize_whitespace(&page_text);

        Self {
            norm_chars: normalized.text.chars().collect(),
            norm_to_orig: normalized.index_map,
            span_of_char,
            span_bounds,
        }
    }

    /// Bounding geometry for a normalized character range: the union of each
    /// contributing span's box restricted to the matched characters
    fn region_bbox(&self, start: usize, end: usize, spans: &[PositionedSpan]) -> BoundingBox {
        let orig_start = self.norm_to_orig[start];
        let orig_end = self.norm_to_orig[end - 1] + 1;

        let first_span = self.span_of_char[orig_start];
        let last_span = self.span_of_char[orig_end - 1];

        let mut bbox: Option<BoundingBox> = None;
        for span_idx in first_span..=last_span {
            let (span_start, span_end) = self.span_bounds[span_idx];
            let lo = orig_start.max(span_start);
            let hi = orig_end.min(span_end);
            if lo >= hi {
                continue;
            }

            let len = (span_end - span_start) as f64;
            let slice = spans[span_idx].bbox.hslice(
                (lo - span_start) as f64 / len,
                (hi - span_start) as f64 / len,
            );
            bbox = Some(match bbox {
                Some(acc) => acc.union(&slice),
                None => slice,
            });
        }

        // A non-empty range always touches at least one span
        bbox.unwrap_or(spans[first_span].bbox)
    }
}

/// Matches computed for one page
#[derive(Debug, Clone)]
pub struct PageMatches {
    /// One region per occurrence of each entity; never deduplicated
    pub regions: Vec<MatchRegion>,
    /// Indices of entities with zero occurrences on this page
    pub unmatched: Vec<usize>,
}

/// Character comparison mode for a search pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseMode {
    Insensitive,
    Exact,
}

/// Redaction matcher over positioned page text
///
/// Stateless; pages may be matched independently and in parallel. The matcher
/// only reads the entity list and the page's spans.
pub struct RedactionMatcher;

impl RedactionMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Locate every occurrence of an entity's text on an indexed page
    ///
    /// This is the single search path behind preview and commit. Returns
    /// normalized character ranges. The primary pass compares characters
    /// case-insensitively; when it yields nothing, a stricter exact-case pass
    /// retries, which sidesteps case-folding surprises on non-Latin or
    /// symbol-heavy strings.
    pub fn locate(&self, entity_text: &str, page: &PageIndex) -> Vec<(usize, usize)> {
        debug_assert!(
            !entity_text.trim().is_empty(),
            "entity text must be non-empty"
        );

        let needle: Vec<char> = normalize_whitespace(entity_text).text.chars().collect();
        if needle.is_empty() {
            return Vec::new();
        }

        let hits = find_occurrences(&page.norm_chars, &needle, CaseMode::Insensitive);
        if !hits.is_empty() {
            return hits;
        }
        find_occurrences(&page.norm_chars, &needle, CaseMode::Exact)
    }

    /// Match every entity against one page
    ///
    /// Every occurrence of every entity produces one region; entities with no
    /// occurrence on the page are reported in `unmatched` rather than
    /// silently dropped. Entities are never mutated.
    pub fn match_page(&self, entities: &[Entity], spans: &[PositionedSpan]) -> PageMatches {
        let page = PageIndex::build(spans);

        let mut regions = Vec::new();
        let mut unmatched = Vec::new();

        for (index, entity) in entities.iter().enumerate() {
            debug_assert!(
                (0.0..=1.0).contains(&entity.score),
                "entity score out of range"
            );

            let hits = self.locate(&entity.text, &page);
            if hits.is_empty() {
                unmatched.push(index);
                continue;
            }

            for (start, end) in hits {
                regions.push(MatchRegion {
                    entity_index: index,
                    text: entity.text.clone(),
                    bbox: page.region_bbox(start, end, spans),
                });
            }
        }

        PageMatches { regions, unmatched }
    }

    /// Preview matching for operator highlighting
    ///
    /// Identical to [`match_page`](Self::match_page) by construction: the set
    /// of occurrences highlighted before committing is exactly the set of
    /// occurrences covered by the committed regions.
    pub fn preview_page(&self, entities: &[Entity], spans: &[PositionedSpan]) -> PageMatches {
        self.match_page(entities, spans)
    }
}

impl Default for RedactionMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Find every non-overlapping occurrence of `needle` in `haystack`
fn find_occurrences(haystack: &[char], needle: &[char], mode: CaseMode) -> Vec<(usize, usize)> {
    let n = needle.len();
    if n == 0 || haystack.len() < n {
        return Vec::new();
    }

    let mut hits = Vec::new();
    let mut i = 0;
    while i + n <= haystack.len() {
        if matches_at(haystack, i, needle, mode) {
            hits.push((i, i + n));
            i += n;
        } else {
            i += 1;
        }
    }
    hits
}

fn matches_at(haystack: &[char], at: usize, needle: &[char], mode: CaseMode) -> bool {
    needle
        .iter()
        .zip(&haystack[at..at + needle.len()])
        .all(|(a, b)| match mode {
            CaseMode::Exact => a == b,
            CaseMode::Insensitive => chars_eq_fold(*a, *b),
        })
}

/// Per-character case fold that keeps the index map exact
fn chars_eq_fold(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
