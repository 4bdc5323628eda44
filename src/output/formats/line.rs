//! Line output formatter

use crate::check::result::CheckResult;
use crate::output::traits::{FormatResult, OutputFormat, OutputFormatter};
use crate::output::value::MetricValue;

/// One `key value` line per variable; meta, exit code and message are ignored.
/// Booleans are written as `True` / `False`.
pub struct LineFormatter;

impl LineFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for LineFormatter {
    fn format(&self, result: &CheckResult) -> FormatResult {
        let output = result
            .variables
            .iter()
            .map(|(key, value)| match value {
                MetricValue::Bool(true) => format!("{} True\n", key),
                MetricValue::Bool(false) => format!("{} False\n", key),
                other => format!("{} {}\n", key, other),
            })
            .collect();
        Ok(output)
    }

    fn format_type(&self) -> OutputFormat {
        OutputFormat::Line
    }
}
