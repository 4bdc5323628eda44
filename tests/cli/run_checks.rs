//! Running checks end to end

use crate::common::{run_cli, settings_file, MISSING_PROCESS};
use monitorstack::app::startup::CONFIG_ERROR_EXIT;
use monitorstack::check::check_names;
use serial_test::serial;
use tempfile::TempDir;

#[test]
#[serial]
fn test_missing_process_in_line_format() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "");
    let (code, out) = run_cli(&[
        "monitorstack",
        "--settings",
        settings.to_str().unwrap(),
        "--format",
        "line",
        "process",
        MISSING_PROCESS,
    ]);
    assert_eq!(code, 1);
    assert_eq!(out, format!("{} 0\n", MISSING_PROCESS));
}

#[test]
#[serial]
fn test_openstack_check_without_config_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "");
    let config = dir.path().join("missing.toml");
    let cache = dir.path().join("cache");
    let (code, out) = run_cli(&[
        "monitorstack",
        "--settings",
        settings.to_str().unwrap(),
        "--cache-dir",
        cache.to_str().unwrap(),
        "--format",
        "rax-maas",
        "os_vm_quota_cores",
        "--config-file",
        config.to_str().unwrap(),
    ]);
    assert_eq!(code, 1);
    assert!(out.starts_with("status error os_vm_quota_cores failed -- Exception ["));
}

#[test]
#[serial]
fn test_unknown_module_is_not_found() {
    let dir = TempDir::new().unwrap();
    let settings = settings_file(&dir, "");
    let (code, out) = run_cli(&["monitorstack", "--settings", settings.to_str().unwrap(), "bogus"]);
    assert_eq!(code, CONFIG_ERROR_EXIT);
    assert!(out.is_empty());
}

#[test]
fn test_registry_is_complete() {
    let names = check_names();
    for expected in ["uptime", "conntrack", "process", "memcache", "vg_check", "kvm"] {
        assert!(names.contains(&expected), "{} not registered", expected);
    }
    assert_eq!(names.iter().filter(|n| n.starts_with("os_")).count(), 10);
}
