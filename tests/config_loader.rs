mod common;

use counterdeck::config::{Config, ConfigError};
use counterdeck::controller::ControllerOptions;
use std::time::Duration;

use common::temp_config;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.gateway.base_url, "http://127.0.0.1:4943");
    assert_eq!(config.gateway.timeout_seconds, 30);
    assert_eq!(config.gateway.connect_timeout_seconds, 5);
    assert_eq!(config.effects.tick_ms, 50);
    assert_eq!(config.effects.increment_burst, 10);
    assert_eq!(config.effects.reset_burst, 15);
    assert_eq!(config.effects.seed, None);
    assert_eq!(config.ui.theme, None);
    assert_eq!(config.ui.frame_ms, 100);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("counterdeck/config.toml"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let (_dir, path) = temp_config(
        r#"
[gateway]
base_url = "https://counter.example"

[effects]
seed = 99
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.gateway.base_url, "https://counter.example");
    assert_eq!(config.gateway.timeout_seconds, 30);
    assert_eq!(config.effects.seed, Some(99));
    assert_eq!(config.effects.tick(), Duration::from_millis(50));
    assert_eq!(config.ui.frame_interval(), Duration::from_millis(100));
}

#[test]
fn test_full_file_round_trips_into_options() {
    let (_dir, path) = temp_config(
        r#"
[gateway]
base_url = "http://localhost:8000"
timeout_seconds = 10
connect_timeout_seconds = 2

[effects]
tick_ms = 20
increment_burst = 4
reset_burst = 6
seed = 1

[ui]
theme = "ocean"
frame_ms = 40

[logging]
level = "debug"
file = "/tmp/counterdeck.log"
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.gateway.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.gateway.connect_timeout(), Duration::from_secs(2));
    assert_eq!(config.logging.level, "debug");

    let options = ControllerOptions::from_config(&config);
    assert_eq!(options.tick, Duration::from_millis(20));
    assert_eq!(options.increment_burst, 4);
    assert_eq!(options.reset_burst, 6);
    assert_eq!(options.seed, Some(1));
    assert_eq!(options.theme_index, 2);
}

#[test]
fn test_parse_error_reports_path() {
    let (_dir, path) = temp_config("[gateway\nbase_url = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_validation_rejects_bad_url() {
    let (_dir, path) = temp_config(
        r#"
[gateway]
base_url = "ftp://counter"
"#,
    );
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("http://"));
}

#[test]
fn test_validation_rejects_zero_periods() {
    let mut config = Config::default();
    config.effects.tick_ms = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.ui.frame_ms = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.gateway.timeout_seconds = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_lists_available_themes() {
    let mut config = Config::default();
    config.ui.theme = Some("neon".to_string());
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("Unknown theme 'neon'"));
    assert!(err.contains("Available themes: aurora, sunset, ocean, forest"));
}
