//! Output formatting modules
//!
//! Each format is implemented in its own module; [`get_formatter`] maps an
//! [`OutputFormat`] to its implementation.

pub mod json;
pub mod line;
pub mod rax_maas;
pub mod telegraf;

pub use json::JsonFormatter;
pub use line::LineFormatter;
pub use rax_maas::RaxMaasFormatter;
pub use telegraf::TelegrafFormatter;

use crate::output::traits::{OutputFormat, OutputFormatter};

/// Get formatter for the specified format
pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(json::JsonFormatter::new()),
        OutputFormat::Line => Box::new(line::LineFormatter::new()),
        OutputFormat::Telegraf => Box::new(telegraf::TelegrafFormatter::new()),
        OutputFormat::RaxMaas => Box::new(rax_maas::RaxMaasFormatter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_format_has_a_formatter() {
        for format in OutputFormat::formats() {
            assert_eq!(get_formatter(format).format_type(), format);
        }
    }
}
