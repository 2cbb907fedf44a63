//! Redaction plan reporting
//!
//! Aggregates per-page match results so the operator can be warned about
//! entities that were detected but could not be located on any page.

use super::matcher::PageMatches;
use crate::domain::Entity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Report over a whole document's redaction plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionReport {
    /// Pages processed
    pub total_pages: usize,

    /// Regions produced across all pages
    pub total_regions: usize,

    /// Occurrence counts per entity text
    pub regions_by_entity: HashMap<String, usize>,

    /// Entities with zero regions on every page
    ///
    /// A "found" item that cannot be located for redaction (ligatures,
    /// hyphenation across lines, extraction artifacts) is surfaced here,
    /// never silently dropped.
    pub unmatched_entities: Vec<String>,

    /// Free-form warnings
    pub warnings: Vec<String>,
}

impl RedactionReport {
    /// Create a report for a canonical entity list
    pub fn new(entities: &[Entity]) -> Self {
        let mut regions_by_entity = HashMap::new();
        for entity in entities {
            regions_by_entity.entry(entity.text.clone()).or_insert(0);
        }

        Self {
            total_pages: 0,
            total_regions: 0,
            regions_by_entity,
            unmatched_entities: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Fold one page's matches into the report
    pub fn add_page(&mut self, matches: &PageMatches) {
        self.total_pages += 1;
        self.total_regions += matches.regions.len();
        for region in &matches.regions {
            *self.regions_by_entity.entry(region.text.clone()).or_insert(0) += 1;
        }
    }

    /// Compute the unmatched entity list after every page was added
    pub fn finalize(&mut self) {
        self.unmatched_entities = self
            .regions_by_entity
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(text, _)| text.clone())
            .collect();
        self.unmatched_entities.sort();

        for text in &self.unmatched_entities {
            self.warnings.push(format!(
                "entity \"{text}\" was detected but could not be located on any page"
            ));
        }
    }

    /// Number of entities with zero regions
    pub fn unmatched_count(&self) -> usize {
        self.unmatched_entities.len()
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push_str("REDACTION PLAN\n");
        output.push_str(&format!("  Pages:          {}\n", self.total_pages));
        output.push_str(&format!("  Regions:        {}\n", self.total_regions));
        output.push_str(&format!(
            "  Entities:       {}\n",
            self.regions_by_entity.len()
        ));
        output.push_str(&format!("  Unmatched:      {}\n", self.unmatched_count()));

        if !self.warnings.is_empty() {
            output.push_str("\nWARNINGS\n");
            for warning in &self.warnings {
                output.push_str(&format!("  - {warning}\n"));
            }
        }

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write report to file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self
            .format_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoundingBox, EntitySource, PositionedSpan};
    use crate::redaction::matcher::RedactionMatcher;

    fn entity(text: &str) -> Entity {
        Entity::new(text, 0.9, EntitySource::Pattern, "unknown")
    }

    fn span(text: &str) -> PositionedSpan {
        PositionedSpan::new(text, BoundingBox::new(0.0, 0.0, 100.0, 10.0))
    }

    #[test]
    fn test_report_counts_and_unmatched() {
        let entities = [entity("Almeida"), entity("ghost")];
        let matcher = RedactionMatcher::new();
        let mut report = RedactionReport::new(&entities);

        report.add_page(&matcher.match_page(&entities, &[span("Almeida here")]));
        report.add_page(&matcher.match_page(&entities, &[span("Almeida again")]));
        report.finalize();

        assert_eq!(report.total_pages, 2);
        assert_eq!(report.total_regions, 2);
        assert_eq!(report.regions_by_entity.get("Almeida"), Some(&2));
        assert_eq!(report.unmatched_entities, vec!["ghost"]);
        assert_eq!(report.unmatched_count(), 1);
    }

    #[test]
    fn test_entity_matched_on_later_page_not_unmatched() {
        let entities = [entity("Almeida")];
        let matcher = RedactionMatcher::new();
        let mut report = RedactionReport::new(&entities);

        report.add_page(&matcher.match_page(&entities, &[span("nothing here")]));
        report.add_page(&matcher.match_page(&entities, &[span("Almeida at last")]));
        report.finalize();

        assert!(report.unmatched_entities.is_empty());
    }

    #[test]
    fn test_console_format_mentions_warnings() {
        let entities = [entity("ghost")];
        let mut report = RedactionReport::new(&entities);
        report.add_page(&RedactionMatcher::new().match_page(&entities, &[span("none")]));
        report.finalize();

        let console = report.format_console();
        assert!(console.contains("Unmatched:      1"));
        assert!(console.contains("ghost"));
    }
}
