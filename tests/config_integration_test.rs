//! Configuration loading integration tests

use blackout::config::EngineConfig;
use blackout::detection::DetectionEngine;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
[detection]
rule_confidence = 0.85
token_score_floor = 0.6
min_entity_chars = 4
keyword_window = 80

[audit]
enabled = false

[logging]
local_enabled = false
"#,
    );

    let config = EngineConfig::from_file(file.path()).expect("Failed to load config");
    assert!((config.detection.rule_confidence - 0.85).abs() < f32::EPSILON);
    assert!((config.detection.token_score_floor - 0.6).abs() < f32::EPSILON);
    assert_eq!(config.detection.min_entity_chars, 4);
    assert_eq!(config.detection.keyword_window, 80);
}

#[test]
fn test_empty_config_uses_defaults() {
    let file = write_config("");
    let config = EngineConfig::from_file(file.path()).expect("Failed to load config");
    assert!((config.detection.rule_confidence - 0.92).abs() < f32::EPSILON);
    assert_eq!(config.detection.min_entity_chars, 3);
}

#[test]
fn test_invalid_confidence_rejected() {
    let file = write_config("[detection]\nrule_confidence = 2.0\n");
    assert!(EngineConfig::from_file(file.path()).is_err());
}

#[test]
fn test_missing_pattern_library_rejected() {
    let file = write_config("[patterns]\nlibrary = \"/nonexistent/patterns.toml\"\n");
    assert!(EngineConfig::from_file(file.path()).is_err());
}

#[test]
fn test_min_entity_chars_flows_into_engine() {
    let file = write_config("[detection]\nmin_entity_chars = 6\n");
    let config = EngineConfig::from_file(file.path()).expect("Failed to load config");
    let engine = DetectionEngine::new(&config).expect("Failed to create engine");

    let request = blackout::detection::ScanRequest {
        text: "Mail a@b.org or long.address@example.com".to_string(),
        ..Default::default()
    };
    let outcome = engine.scan(&request, vec![]);

    // "a@b.org" is 7 chars and survives; nothing under 6 chars does
    assert!(outcome.entities.iter().all(|e| e.text.chars().count() >= 6));
    assert!(outcome
        .entities
        .iter()
        .any(|e| e.text == "long.address@example.com"));
}

#[test]
fn test_external_pattern_library_loaded() {
    let patterns = write_config(
        r#"
version = 1

[patterns.badge]
kind = "badge-number"
confidence = 0.9
patterns = ['\bBDG-\d{4}\b']

[presets.custom]
name = "Custom"
"#,
    );
    // Pattern library path must end in .toml
    let path = patterns.path().with_extension("toml");
    std::fs::copy(patterns.path(), &path).expect("Failed to copy library");

    let config_contents = format!("[patterns]\nlibrary = \"{}\"\n", path.display());
    let config_file = write_config(&config_contents);

    let config = EngineConfig::from_file(config_file.path()).expect("Failed to load config");
    let engine = DetectionEngine::new(&config).expect("Failed to create engine");

    let request = blackout::detection::ScanRequest {
        text: "Badge BDG-7741 issued".to_string(),
        ..Default::default()
    };
    let outcome = engine.scan(&request, vec![]);
    assert!(outcome.entities.iter().any(|e| e.text == "BDG-7741"));

    std::fs::remove_file(&path).ok();
}
