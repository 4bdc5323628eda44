//! JSON output formatter

use crate::check::result::CheckResult;
use crate::output::traits::{FormatResult, OutputFormat, OutputFormatter};

/// Serializes the whole result, indented by two spaces
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON formatter
    pub fn new_compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &CheckResult) -> FormatResult {
        let mut output = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };
        output.push('\n');
        Ok(output)
    }

    fn format_type(&self) -> OutputFormat {
        OutputFormat::Json
    }
}
