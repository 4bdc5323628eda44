//! Telegraf line protocol formatter
//!
//! `<measurement>[ <tags>] <fields> <timestamp_ns>`

use crate::check::result::CheckResult;
use crate::core::time::{SystemTimeProvider, TimeProvider};
use crate::output::line_protocol::line_format;
use crate::output::traits::{FormatResult, OutputFormat, OutputFormatter};

pub struct TelegrafFormatter {
    clock: Box<dyn TimeProvider>,
}

impl TelegrafFormatter {
    pub fn new() -> Self {
        Self::with_time_provider(Box::new(SystemTimeProvider))
    }

    pub fn with_time_provider(clock: Box<dyn TimeProvider>) -> Self {
        Self { clock }
    }
}

impl Default for TelegrafFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TelegrafFormatter {
    fn format(&self, result: &CheckResult) -> FormatResult {
        let mut resultant = vec![result.measurement_name.clone()];
        if let Some(meta) = result.meta.as_ref().filter(|m| !m.is_empty()) {
            resultant.push(line_format(meta, false));
        }
        resultant.push(line_format(&result.variables, true));
        resultant.push(self.clock.timestamp_nanos().to_string());

        let mut output = resultant.join(" ");
        output.push('\n');
        Ok(output)
    }

    fn format_type(&self) -> OutputFormat {
        OutputFormat::Telegraf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedTimeProvider;
    use crate::output::tests::sample_result;

    fn formatter() -> TelegrafFormatter {
        TelegrafFormatter::with_time_provider(Box::new(FixedTimeProvider::from_nanos(
            1_500_000_000_000_000_000,
        )))
    }

    #[test]
    fn test_telegraf_with_meta() {
        let output = formatter().format(&sample_result()).unwrap();
        assert_eq!(
            output,
            "system_uptime platform=example_platform uptime=29587.75 1500000000000000000\n"
        );
    }

    #[test]
    fn test_telegraf_without_meta() {
        let result = sample_result().without_meta();
        let output = formatter().format(&result).unwrap();
        assert_eq!(output, "system_uptime uptime=29587.75 1500000000000000000\n");
    }

    #[test]
    fn test_telegraf_empty_meta_is_omitted() {
        let mut result = sample_result();
        result.meta = Some(Default::default());
        let output = formatter().format(&result).unwrap();
        assert!(!output.contains("  "));
        assert!(output.starts_with("system_uptime uptime="));
    }

    #[test]
    fn test_telegraf_quotes_text_fields_only() {
        let result = CheckResult::new("process", "ok")
            .without_meta()
            .with_variable("state", "running")
            .with_variable("count", 4);
        let output = formatter().format(&result).unwrap();
        assert!(output.contains("count=4,state=\"running\""));
    }

    #[test]
    fn test_telegraf_live_clock_ends_with_positive_timestamp() {
        let result = sample_result();
        let output = TelegrafFormatter::new().format(&result).unwrap();
        assert!(output.starts_with(&result.measurement_name));
        let last = output.trim_end().rsplit(' ').next().unwrap();
        assert!(last.parse::<u128>().unwrap() > 0);
    }
}
