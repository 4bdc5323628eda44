//! Output scenario tests shared by the formatter modules


use crate::check::result::CheckResult;

/// The uptime result used throughout the formatter tests
pub(crate) fn sample_result() -> CheckResult {
    CheckResult::new("system_uptime", "uptime is ok")
        .with_meta("platform", "example_platform")
        .with_variable("uptime", "29587.75")
}
