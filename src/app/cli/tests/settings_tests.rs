//! Tests for settings file loading

use crate::app::cli::settings::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn settings(text: &str) -> Result<Settings, SettingsError> {
    parse_settings(Path::new("monitorstack.toml"), text)
}

#[test]
fn test_all_keys() {
    let parsed = settings(
        r#"
format = "telegraf"
verbose = true
log-level = "INFO"
log-format = "json"
log-file = "/var/log/monitorstack.log"
color = true
cache-dir = "/var/cache/monitorstack"
cache-ttl = 600
"#,
    )
    .unwrap();

    assert_eq!(parsed.format.as_deref(), Some("telegraf"));
    assert_eq!(parsed.verbose, Some(true));
    assert_eq!(parsed.log_level.as_deref(), Some("info"));
    assert_eq!(parsed.log_format.as_deref(), Some("json"));
    assert_eq!(parsed.log_file, Some(PathBuf::from("/var/log/monitorstack.log")));
    assert_eq!(parsed.color, Some(true));
    assert_eq!(parsed.cache_dir, Some(PathBuf::from("/var/cache/monitorstack")));
    assert_eq!(parsed.cache_ttl, Some(600));
}

#[test]
fn test_empty_file_sets_nothing() {
    assert_eq!(settings("").unwrap(), Settings::default());
}

#[test]
fn test_log_file_none_disables_logging_to_file() {
    assert_eq!(settings("log-file = \"none\"").unwrap().log_file, None);
    assert_eq!(settings("log-file = \"-\"").unwrap().log_file, None);
}

#[test]
fn test_no_color_inverts() {
    assert_eq!(settings("no-color = true").unwrap().color, Some(false));
}

#[test]
fn test_wrong_types_are_rejected() {
    assert!(matches!(
        settings("verbose = \"yes\""),
        Err(SettingsError::InvalidValue { ref key, .. }) if key == "verbose"
    ));
    assert!(settings("cache-ttl = -5").is_err());
    assert!(settings("log-level = \"loud\"").is_err());
    assert!(settings("log-format = \"xml\"").is_err());
}

#[test]
fn test_invalid_toml() {
    assert!(matches!(settings("format = "), Err(SettingsError::Parse { .. })));
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let err = load_settings(Some(Path::new("/nonexistent/monitorstack.toml"))).unwrap_err();
    assert!(matches!(err, SettingsError::NotFound { .. }));
}

#[test]
fn test_load_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("monitorstack.toml");
    std::fs::write(&path, "format = \"line\"\n").unwrap();
    assert_eq!(
        load_settings(Some(&path)).unwrap().format.as_deref(),
        Some("line")
    );
}

#[test]
fn test_default_path_location() {
    if let Some(path) = default_settings_path() {
        assert!(path.ends_with("Monitorstack/monitorstack.toml"));
    }
}
