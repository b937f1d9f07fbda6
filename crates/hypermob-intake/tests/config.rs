use hypermob_intake::config::{load_config, save_config, IntakeConfig};
use hypermob_intake::error::IntakeError;
use hypermob_scoring::ScoringScheme;

#[test]
fn default_config_uses_weighted_scheme() {
    let config = IntakeConfig::default();
    assert_eq!(config.scoring_scheme, "weighted_v2");
    assert_eq!(config.bmi_decimals, 2);

    let derivation = config.derivation().unwrap();
    assert_eq!(derivation.scheme().threshold(), 8);
    assert_eq!(derivation.bmi_decimals(), 2);
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("intake.json");
    let config = IntakeConfig {
        bmi_decimals: 1,
        ..IntakeConfig::default()
    };

    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn pre_versioned_config_migrates_to_unweighted_scheme() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intake.json");
    std::fs::write(&path, "{}").unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.scoring_scheme, "unweighted_v1");
    assert_eq!(config.bmi_decimals, 2);
    assert_eq!(config.derivation().unwrap().scheme().threshold(), 5);
}

#[test]
fn pre_versioned_values_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intake.json");
    std::fs::write(&path, r#"{"scoring_scheme":"weighted_v2","bmi_decimals":0}"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.scoring_scheme, "weighted_v2");
    assert_eq!(config.bmi_decimals, 0);
}

#[test]
fn newer_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intake.json");
    std::fs::write(&path, r#"{"config_version":99}"#).unwrap();

    assert!(matches!(load_config(&path), Err(IntakeError::Config(_))));
}

#[test]
fn oversized_version_is_not_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intake.json");
    // 2^32 + 1 would wrap to 1.
    std::fs::write(
        &path,
        r#"{"config_version":4294967297,"scoring_scheme":"weighted_v2","bmi_decimals":2,"created_at":"2024-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    assert!(matches!(load_config(&path), Err(IntakeError::Config(_))));
}

#[test]
fn unknown_scheme_is_a_config_error() {
    let config = IntakeConfig {
        scoring_scheme: "blended".to_string(),
        ..IntakeConfig::default()
    };
    assert!(matches!(config.derivation(), Err(IntakeError::Config(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_config(&dir.path().join("absent.json")),
        Err(IntakeError::Io(_))
    ));
}
