//! System uptime

use crate::app::context::RunContext;
use crate::check::error::{CheckError, CheckOutcome};
use crate::check::result::CheckResult;
use crate::check::traits::Check;
use crate::core::platform::platform;
use crate::output::value::format_float;
use clap::ArgMatches;
use std::path::{Path, PathBuf};

const PROC_UPTIME: &str = "/proc/uptime";

pub struct UptimeCheck {
    path: PathBuf,
}

impl UptimeCheck {
    pub fn new() -> Self {
        Self::with_path(PROC_UPTIME)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for UptimeCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds since boot: the first of the two fields in `/proc/uptime`
pub fn read_uptime(path: &Path) -> CheckOutcome<f64> {
    let text = std::fs::read_to_string(path).map_err(|source| CheckError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let first = text.split_whitespace().next().unwrap_or_default();
    first
        .parse::<f64>()
        .map_err(|_| CheckError::parse("uptime value", first))
}

impl Check for UptimeCheck {
    fn name(&self) -> &'static str {
        "uptime"
    }

    fn about(&self) -> &'static str {
        "Get system uptime."
    }

    fn run(&self, ctx: &RunContext, _matches: &ArgMatches) -> CheckResult {
        let mut result =
            CheckResult::new("system_uptime", "uptime is ok").with_meta("platform", platform());

        match read_uptime(&self.path) {
            Ok(uptime) => {
                ctx.vlog(&format!("uptime read from {}", self.path.display()));
                result.insert_variable("uptime", format_float(uptime));
            }
            Err(e) => crate::check::api::fail_with(&mut result, "uptime", &e),
        }
        result
    }
}

crate::check!(|| Box::new(UptimeCheck::new()));
