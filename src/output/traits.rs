//! Output formatter traits and format definitions

use crate::check::result::CheckResult;
use crate::output::error::{OutputError, OutputResult};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Output formats selectable with `--format`
#[derive(EnumIter, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Whole result as indented JSON
    #[default]
    Json,
    /// One `key value` line per variable
    Line,
    /// Telegraf/InfluxDB line protocol
    Telegraf,
    /// Rackspace Monitoring as a Service status/metric lines
    RaxMaas,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Line => "line",
            Self::Telegraf => "telegraf",
            Self::RaxMaas => "rax-maas",
        }
    }

    /// Public iterator over all OutputFormat variants
    pub fn formats() -> impl Iterator<Item = OutputFormat> {
        OutputFormat::iter()
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        OutputFormat::iter().map(|fmt| fmt.name())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    /// Names match exactly; `JSON` or ` json` are rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::formats()
            .find(|fmt| fmt.name() == s)
            .ok_or_else(|| OutputError::UnknownFormat {
                name: s.to_string(),
                valid: Self::names().collect::<Vec<_>>().join(", "),
            })
    }
}

/// Result type returned by formatters: the complete rendered text
pub type FormatResult = OutputResult<String>;

/// Renders a single check result into text
pub trait OutputFormatter {
    /// Render `result`; every emitted line is newline terminated
    fn format(&self, result: &CheckResult) -> FormatResult;

    /// Which format this formatter produces
    fn format_type(&self) -> OutputFormat;
}
