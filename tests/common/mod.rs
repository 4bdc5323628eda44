//! Shared fixtures for the integration tests

#![allow(dead_code)]

use monitorstack::check::CheckResult;
use std::path::PathBuf;
use tempfile::TempDir;

/// A process name that is never running
pub const MISSING_PROCESS: &str = "no-such-process-7d2e41";

/// The uptime result used throughout the output tests
pub fn uptime_result() -> CheckResult {
    CheckResult::new("system_uptime", "uptime is ok")
        .with_meta("platform", "example_platform")
        .with_variable("uptime", "29587.75")
}

/// Write an (optionally empty) settings file and return its path
pub fn settings_file(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("monitorstack.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Run the CLI with `argv`, returning the exit code and stdout
pub fn run_cli(argv: &[&str]) -> (i32, String) {
    let mut out = Vec::new();
    let code = monitorstack::app::startup::run(argv.iter().copied(), &mut out);
    (code, String::from_utf8(out).unwrap())
}
