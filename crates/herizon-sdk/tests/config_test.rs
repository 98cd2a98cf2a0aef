//! Config loading and defaults integration tests

use std::io::Write;

use herizon_sdk::{SdkConfig, SdkError};

#[test]
fn test_partial_file_keeps_defaults() {
    let toml_str = r#"
[endpoints]
server_url = "https://api.herizon.example/"

[water]
daily_goal = 10
"#;

    let config = SdkConfig::from_toml_str(toml_str).expect("valid TOML");
    assert_eq!(config.endpoints.server_url, "https://api.herizon.example/");
    assert_eq!(config.endpoints.server_timeout_ms, 8000);
    assert_eq!(config.endpoints.mirror_timeout_ms, 30_000);
    assert_eq!(config.water.daily_goal, 10);
    assert_eq!(config.water.sync_timeout_ms, 5000);
    assert_eq!(config.notifications.interval_secs, 30);
    assert_eq!(config.submission.timeout_ms, 10_000);
    config.validate().unwrap();

    let registry = config.endpoint_registry().unwrap();
    let addresses: Vec<&str> = registry.iter().map(|e| e.base_address.as_str()).collect();
    assert_eq!(
        addresses,
        vec![
            "https://api.herizon.example/",
            "https://Herizon.onrender.com/",
            "http://localhost:3000/"
        ]
    );
    assert_eq!(config.submission_endpoint().timeout_ms, 10_000);
    assert_eq!(config.water_endpoint().timeout_ms, 5000);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[alerts]
relay_urls = ["https://relay.example/a"]
app_name = "Herizon Test"

[notifications]
interval_secs = 60
visible_secs = 10
"#
    )
    .unwrap();

    let config = SdkConfig::load(file.path()).unwrap();
    assert_eq!(config.alerts.relay_urls, vec!["https://relay.example/a"]);
    assert_eq!(config.alerts.app_name, "Herizon Test");
    assert_eq!(config.notifications.visible_secs, 10);
    config.validate().unwrap();
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = SdkConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, SdkConfig::default());
}

#[test]
fn test_invalid_values_rejected() {
    let config = SdkConfig::from_toml_str("[water]\ndaily_goal = 0\n").unwrap();
    assert!(matches!(config.validate(), Err(SdkError::Config(_))));

    let config = SdkConfig::from_toml_str("[endpoints]\nlocal_timeout_ms = 0\n").unwrap();
    assert!(config.validate().is_err());

    let err = SdkConfig::from_toml_str("[water]\ndaily_goal = \"lots\"\n").unwrap_err();
    assert!(matches!(err, SdkError::Config(_)));
}
