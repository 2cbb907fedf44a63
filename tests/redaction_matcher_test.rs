//! Redaction matcher property tests

use blackout::domain::{BoundingBox, Entity, EntitySource, PositionedSpan};
use blackout::redaction::{RedactionMatcher, RedactionReport};

fn entity(text: &str) -> Entity {
    Entity::new(text, 0.9, EntitySource::Pattern, "unknown")
}

fn span(text: &str, x0: f64, x1: f64, y0: f64) -> PositionedSpan {
    PositionedSpan::new(text, BoundingBox::new(x0, y0, x1, y0 + 12.0))
}

#[test]
fn test_case_insensitive_match_completeness() {
    let spans = [span("Almeida", 0.0, 70.0, 0.0)];
    let matches = RedactionMatcher::new().match_page(&[entity("ALMEIDA")], &spans);
    assert_eq!(matches.regions.len(), 1);
}

#[test]
fn test_whitespace_normalized_match() {
    let spans = [span("L  PINTO   DOS  SANTOS", 0.0, 220.0, 0.0)];
    let matches = RedactionMatcher::new().match_page(&[entity("L PINTO DOS SANTOS")], &spans);
    assert_eq!(matches.regions.len(), 1);
    // The region spans the full text
    assert!(matches.regions[0].bbox.x0 < 1.0);
    assert!(matches.regions[0].bbox.x1 > 210.0);
}

#[test]
fn test_exhaustive_occurrence() {
    let spans = [
        span("Ref 99Z-1 on page one. ", 0.0, 220.0, 0.0),
        span("Then 99Z-1 again, and finally 99Z-1.", 0.0, 360.0, 20.0),
    ];
    let matches = RedactionMatcher::new().match_page(&[entity("99Z-1")], &spans);
    assert_eq!(matches.regions.len(), 3);
}

#[test]
fn test_preview_commit_equivalence() {
    let entities = [entity("Almeida"), entity("account 42"), entity("absent")];
    let spans = [
        span("Almeida holds ", 0.0, 140.0, 0.0),
        span("account   42 under ALMEIDA", 0.0, 260.0, 20.0),
    ];
    let matcher = RedactionMatcher::new();

    let preview = matcher.preview_page(&entities, &spans);
    let commit = matcher.match_page(&entities, &spans);

    let highlighted: Vec<_> = preview.regions.iter().map(|r| r.text.clone()).collect();
    let committed: Vec<_> = commit.regions.iter().map(|r| r.text.clone()).collect();
    assert_eq!(highlighted, committed);
    assert_eq!(preview.unmatched, commit.unmatched);
}

#[test]
fn test_entity_assembled_from_consecutive_spans() {
    // Word-split layout: the name crosses a span boundary
    let spans = [
        span("Maria ", 0.0, 60.0, 0.0),
        span("Fernanda ", 60.0, 150.0, 0.0),
        span("Costa", 150.0, 200.0, 0.0),
    ];
    let matches =
        RedactionMatcher::new().match_page(&[entity("Maria Fernanda Costa")], &spans);
    assert_eq!(matches.regions.len(), 1);
    let bbox = matches.regions[0].bbox;
    assert!(bbox.x0 < 1.0);
    assert!((bbox.x1 - 200.0).abs() < 1.0);
}

#[test]
fn test_match_crossing_lines_unions_geometry() {
    let spans = [
        span("payable to John ", 0.0, 160.0, 0.0),
        span("Smith on demand", 0.0, 150.0, 20.0),
    ];
    let matches = RedactionMatcher::new().match_page(&[entity("John Smith")], &spans);
    assert_eq!(matches.regions.len(), 1);
    let bbox = matches.regions[0].bbox;
    // Union covers both lines vertically
    assert!(bbox.y0 < 1.0);
    assert!(bbox.y1 > 30.0);
}

#[test]
fn test_zero_region_entities_counted_not_dropped() {
    let entities = [entity("Almeida"), entity("vanished value")];
    let matcher = RedactionMatcher::new();

    let mut report = RedactionReport::new(&entities);
    report.add_page(&matcher.match_page(&entities, &[span("Almeida page one", 0.0, 160.0, 0.0)]));
    report.add_page(&matcher.match_page(&entities, &[span("page two Almeida", 0.0, 160.0, 0.0)]));
    report.finalize();

    assert_eq!(report.total_regions, 2);
    assert_eq!(report.unmatched_entities, vec!["vanished value"]);
    assert_eq!(report.unmatched_count(), 1);
    assert!(report
        .format_console()
        .contains("could not be located on any page"));
}

#[test]
fn test_manual_and_detected_entities_matched_identically() {
    let detected = entity("confidential");
    let manual = Entity::manual("confidential");
    let spans = [span("this is confidential material", 0.0, 290.0, 0.0)];
    let matcher = RedactionMatcher::new();

    let a = matcher.match_page(&[detected], &spans);
    let b = matcher.match_page(&[manual], &spans);
    assert_eq!(a.regions.len(), b.regions.len());
    assert_eq!(a.regions[0].bbox, b.regions[0].bbox);
}

#[test]
fn test_pages_matched_independently() {
    let entities = [entity("Almeida")];
    let matcher = RedactionMatcher::new();

    let page_one = matcher.match_page(&entities, &[span("Almeida", 0.0, 70.0, 0.0)]);
    let page_two = matcher.match_page(&entities, &[span("nobody here", 0.0, 110.0, 0.0)]);

    assert_eq!(page_one.regions.len(), 1);
    assert!(page_two.regions.is_empty());
    assert_eq!(page_two.unmatched, vec![0]);
}

#[test]
fn test_overlapping_regions_for_same_entity_not_deduplicated() {
    // Two entities covering the same characters both produce regions
    let entities = [entity("John Smith"), entity("john")];
    let spans = [span("John Smith", 0.0, 100.0, 0.0)];
    let matches = RedactionMatcher::new().match_page(&entities, &spans);
    assert_eq!(matches.regions.len(), 2);
}
