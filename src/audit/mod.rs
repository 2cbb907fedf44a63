//! Audit logger for detection and redaction operations
//!
//! Entries record hashes of the input and of detected values; plaintext PII
//! is never written. Audit failures are reported to the caller but a
//! disabled logger is a no-op.

use crate::domain::Entity;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Audit log entry for a completed scan
#[derive(Debug, Serialize)]
struct ScanAuditEntry {
    timestamp: String,
    event: &'static str,
    scan_id: String,
    /// Truncated SHA-256 of the scanned text (no content stored)
    input_hash: String,
    entity_count: usize,
    degraded_detectors: Vec<String>,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed PII)
#[derive(Debug, Serialize)]
struct AuditDetection {
    source: String,
    kind: String,
    score: f32,
    /// SHA-256 hash of the detected value (never log plaintext PII)
    value_hash: String,
}

/// Audit log entry for a computed redaction plan
#[derive(Debug, Serialize)]
struct RedactionAuditEntry {
    timestamp: String,
    event: &'static str,
    scan_id: String,
    page_count: usize,
    region_count: usize,
    unmatched_entities: usize,
}

/// Audit logger writing JSON lines (or plain text) to a local file
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Log a completed scan
    pub fn log_scan(
        &self,
        scan_id: Uuid,
        input_text: &str,
        entities: &[Entity],
        degraded: &[String],
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = ScanAuditEntry {
            timestamp: Utc::now().to_rfc3339(),
            event: "SCAN_COMPLETE",
            scan_id: scan_id.to_string(),
            input_hash: hash_value(input_text),
            entity_count: entities.len(),
            degraded_detectors: degraded.to_vec(),
            detections: entities
                .iter()
                .map(|e| AuditDetection {
                    source: e.source.label().to_string(),
                    kind: e.kind.clone(),
                    score: e.score,
                    value_hash: hash_value(&e.text),
                })
                .collect(),
        };

        if self.json_format {
            self.write_json(&entry)
        } else {
            self.write_line(&format!(
                "[{}] SCAN_COMPLETE scan={} input_hash={} entities={} degraded={}",
                entry.timestamp,
                entry.scan_id,
                entry.input_hash,
                entry.entity_count,
                entry.degraded_detectors.join("|"),
            ))
        }
    }

    /// Log a computed redaction plan
    pub fn log_redaction(
        &self,
        scan_id: Uuid,
        page_count: usize,
        region_count: usize,
        unmatched_entities: usize,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = RedactionAuditEntry {
            timestamp: Utc::now().to_rfc3339(),
            event: "REDACTION_PLANNED",
            scan_id: scan_id.to_string(),
            page_count,
            region_count,
            unmatched_entities,
        };

        if self.json_format {
            self.write_json(&entry)
        } else {
            self.write_line(&format!(
                "[{}] REDACTION_PLANNED scan={} pages={} regions={} unmatched={}",
                entry.timestamp, entry.scan_id, page_count, region_count, unmatched_entities,
            ))
        }
    }

    fn write_json<T: Serialize>(&self, entry: &T) -> Result<()> {
        let line = serde_json::to_string(entry).context("Failed to serialize audit entry")?;
        self.write_line(&line)
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;
        writeln!(file, "{line}").context("Failed to write audit entry")?;
        Ok(())
    }
}

/// Truncated SHA-256 hex digest, enough to correlate without storing content
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    format!("{digest:x}")[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntitySource;
    use tempfile::tempdir;

    #[test]
    fn test_hash_value_stable_and_distinct() {
        assert_eq!(hash_value("test@example.com"), hash_value("test@example.com"));
        assert_ne!(hash_value("test@example.com"), hash_value("other@example.com"));
        assert_eq!(hash_value("x").len(), 16);
    }

    #[test]
    fn test_disabled_logger_is_noop() {
        let logger = AuditLogger::new(PathBuf::from("/nonexistent/audit.log"), true, false).unwrap();
        logger
            .log_scan(Uuid::new_v4(), "text", &[], &[])
            .unwrap();
    }

    #[test]
    fn test_log_scan_never_contains_plaintext() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true, true).unwrap();

        let entities = vec![Entity::new(
            "john.smith@example.com",
            0.95,
            EntitySource::Pattern,
            "email",
        )];
        logger
            .log_scan(Uuid::new_v4(), "Mail john.smith@example.com", &entities, &[])
            .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("SCAN_COMPLETE"));
        assert!(!content.contains("john.smith@example.com"));
    }

    #[test]
    fn test_log_redaction_plain_format() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false, true).unwrap();

        logger.log_redaction(Uuid::new_v4(), 3, 12, 1).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("REDACTION_PLANNED"));
        assert!(content.contains("regions=12"));
    }
}
