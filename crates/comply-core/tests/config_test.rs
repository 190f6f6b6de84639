//! Tests for the Comply configuration system.

use std::sync::Mutex;

use comply_core::config::{ComplyConfig, ConfigOverrides};
use comply_core::errors::ConfigError;
use comply_core::models::MaskingMode;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all COMPLY_ env vars to prevent cross-test contamination.
fn clear_comply_env_vars() {
    for key in [
        "COMPLY_SCORING_PASS_THRESHOLD",
        "COMPLY_LEDGER_DB_PATH",
        "COMPLY_PIPELINE_WORKERS",
        "COMPLY_REDACTION_MASKING_MODE",
        "COMPLY_DETECTION_RECOGNIZER_ENABLED",
        "COMPLY_LAYOUT_TITLECASE_SHOUTING",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_comply_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("comply.toml"),
        r#"
[scoring]
pass_threshold = 0.70

[ledger]
db_path = "project.db"
append_retries = 7

[redaction]
masking_mode = "star"
"#,
    )
    .unwrap();

    std::env::set_var("COMPLY_LEDGER_DB_PATH", "env.db");
    std::env::set_var("COMPLY_SCORING_PASS_THRESHOLD", "0.80");

    let overrides = ConfigOverrides {
        pass_threshold: Some(0.85),
        ..Default::default()
    };
    let config = ComplyConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Overrides beat env and project
    assert_eq!(config.scoring.pass_threshold, Some(0.85));
    // Env beats project
    assert_eq!(config.ledger.effective_db_path(), "env.db");
    // Project beats defaults
    assert_eq!(config.ledger.effective_append_retries(), 7);
    assert_eq!(config.redaction.effective_masking_mode(), MaskingMode::Star);

    clear_comply_env_vars();
}

#[test]
fn test_defaults_without_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_comply_env_vars();

    let dir = tempdir();
    let config = ComplyConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.layout.effective_jump_threshold(), 15.0);
    assert_eq!(config.layout.effective_chaos_ratio(), 0.10);
    assert_eq!(config.layout.effective_line_tolerance(), 4.0);
    assert_eq!(config.layout.effective_min_gutter_width(), 10.0);
    assert!(config.layout.effective_titlecase_shouting());
    assert_eq!(config.neutralizer.effective_dictionary_confidence(), 0.9);
    assert_eq!(config.neutralizer.effective_flag_confidence(), 0.75);
    assert_eq!(config.detection.effective_degraded_confidence_cap(), 0.5);
    assert_eq!(
        config.detection.effective_allowed_labels(),
        vec!["PER", "LOC", "PHONE", "EMAIL"]
    );
    assert_eq!(config.pipeline.effective_accepted_extensions(), vec!["pdf"]);
    assert_eq!(config.redaction.effective_masking_mode(), MaskingMode::Label);
}

#[test]
fn test_pass_threshold_has_no_default() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_comply_env_vars();

    let dir = tempdir();
    let config = ComplyConfig::load(dir.path(), None).unwrap();
    let err = config.scoring.require_pass_threshold().unwrap_err();
    assert!(matches!(err, ConfigError::MissingValue { ref field } if field == "scoring.pass_threshold"));
}

#[test]
fn test_invalid_toml_reports_path() {
    let dir = tempdir();
    std::fs::write(dir.path().join("comply.toml"), "[scoring\npass_threshold = ").unwrap();
    let _lock = ENV_MUTEX.lock().unwrap();
    let err = ComplyConfig::load(dir.path(), None).unwrap_err();
    match err {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("comply.toml")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_validation_rejects_out_of_range_values() {
    let err = ComplyConfig::from_toml("[scoring]\npass_threshold = 1.5\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "scoring.pass_threshold"));

    let err = ComplyConfig::from_toml("[pipeline]\nworkers = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "pipeline.workers"));

    let err = ComplyConfig::from_toml("[layout]\ngutter_band = 0.6\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "layout.gutter_band"));

    let err = ComplyConfig::from_toml("[detection.manual_overrides]\n\" \" = \"PER\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_unknown_keys_ignored() {
    let config = ComplyConfig::from_toml(
        r#"
[layout]
jump_threshold = 20.0
not_a_real_key = true

[something_else]
x = 1
"#,
    )
    .unwrap();
    assert_eq!(config.layout.effective_jump_threshold(), 20.0);
}

#[test]
fn test_manual_overrides_parse() {
    let config = ComplyConfig::from_toml(
        r#"
[detection.manual_overrides]
"Projekt Falke" = "PROJECT"
"ACME GmbH" = "ORG"
"#,
    )
    .unwrap();
    assert_eq!(config.detection.manual_overrides.len(), 2);
    assert_eq!(config.detection.manual_overrides["ACME GmbH"], "ORG");
}

#[test]
fn test_unparseable_env_values_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_comply_env_vars();

    std::env::set_var("COMPLY_PIPELINE_WORKERS", "many");
    std::env::set_var("COMPLY_REDACTION_MASKING_MODE", "blur");
    let dir = tempdir();
    let config = ComplyConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.pipeline.workers, None);
    assert_eq!(config.redaction.masking_mode, None);

    clear_comply_env_vars();
}

#[test]
fn test_toml_round_trip_keeps_values() {
    let config = ComplyConfig::from_toml("[scoring]\npass_threshold = 0.83\n[pipeline]\nworkers = 2\n").unwrap();
    let serialized = config.to_toml().unwrap();
    let reparsed = ComplyConfig::from_toml(&serialized).unwrap();
    assert_eq!(reparsed.scoring.pass_threshold, Some(0.83));
    assert_eq!(reparsed.pipeline.workers, Some(2));
}
