//! Settings file and environment precedence

use crate::common::{run_cli, settings_file, MISSING_PROCESS};
use monitorstack::app::startup::CONFIG_ERROR_EXIT;
use serial_test::serial;
use tempfile::TempDir;

fn run_process_check(settings: &str) -> (i32, String) {
    run_cli(&["monitorstack", "--settings", settings, "process", MISSING_PROCESS])
}

#[test]
#[serial]
fn test_settings_format_applies() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "format = \"line\"\n");
    let (code, out) = run_process_check(settings.to_str().unwrap());
    assert_eq!(code, 1);
    assert_eq!(out, format!("{} 0\n", MISSING_PROCESS));
}

#[test]
#[serial]
fn test_environment_beats_settings_file() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "format = \"line\"\n");

    std::env::set_var("MONITORSTACK_FORMAT", "rax-maas");
    let (code, out) = run_process_check(settings.to_str().unwrap());
    std::env::remove_var("MONITORSTACK_FORMAT");

    assert_eq!(code, 1);
    assert!(out.starts_with("status error process failed -- Process"));
}

#[test]
#[serial]
fn test_settings_path_from_environment() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "format = \"line\"\n");

    std::env::set_var("MONITORSTACK_SETTINGS", settings.to_str().unwrap());
    let (_, out) = run_cli(&["monitorstack", "process", MISSING_PROCESS]);
    std::env::remove_var("MONITORSTACK_SETTINGS");

    assert_eq!(out, format!("{} 0\n", MISSING_PROCESS));
}

#[test]
#[serial]
fn test_invalid_settings_stop_before_the_check() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "format = \"yaml\"\n");
    let (code, out) = run_process_check(settings.to_str().unwrap());
    assert_eq!(code, CONFIG_ERROR_EXIT);
    assert!(out.is_empty());

    let broken = settings_file(&dir, "verbose = [");
    let (code, out) = run_process_check(broken.to_str().unwrap());
    assert_eq!(code, CONFIG_ERROR_EXIT);
    assert!(out.is_empty());
}
