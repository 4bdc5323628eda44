//! Rackspace Monitoring as a Service formatter
//!
//! Emits one `status` line followed by one `metric` line per variable, the
//! literal prefixes parsed by the monitoring agent.

use crate::check::result::CheckResult;
use crate::output::traits::{FormatResult, OutputFormat, OutputFormatter};
use crate::output::value::get_value_types;

pub struct RaxMaasFormatter;

impl RaxMaasFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RaxMaasFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for RaxMaasFormatter {
    fn format(&self, result: &CheckResult) -> FormatResult {
        let state = if result.exit_code == 0 { "okay" } else { "error" };
        let mut output = format!("status {} {}\n", state, result.message);

        for (key, value) in &result.variables {
            let typed = get_value_types(value, result.measurement_type.as_deref());
            let mut metric = vec![
                "metric".to_string(),
                key.clone(),
                typed.measurement_type,
                typed.value.to_string(),
            ];
            if let Some(units) = &result.measurement_units {
                metric.push(units.clone());
            }
            output.push_str(&metric.join(" "));
            output.push('\n');
        }

        Ok(output)
    }

    fn format_type(&self) -> OutputFormat {
        OutputFormat::RaxMaas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_result;

    #[test]
    fn test_rax_maas_exact_output() {
        let output = RaxMaasFormatter::new().format(&sample_result()).unwrap();
        assert_eq!(
            output,
            "status okay uptime is ok\nmetric uptime float 29587.75\n"
        );
    }

    #[test]
    fn test_rax_maas_measurement_type_override() {
        let result = sample_result().with_measurement_type("testType");
        let output = RaxMaasFormatter::new().format(&result).unwrap();
        assert!(output.contains("metric uptime testType 29587.75"));
    }

    #[test]
    fn test_rax_maas_units_suffix() {
        let result = sample_result().with_measurement_units("testUnits");
        let output = RaxMaasFormatter::new().format(&result).unwrap();
        assert!(output
            .lines()
            .any(|l| l == "metric uptime float 29587.75 testUnits"));
    }

    #[test]
    fn test_rax_maas_error_status() {
        let mut result = CheckResult::new("system_uptime", "ok");
        result.fail(1, "uptime failed");
        let output = RaxMaasFormatter::new().format(&result).unwrap();
        assert_eq!(output, "status error uptime failed\n");
    }

    #[test]
    fn test_rax_maas_integer_types() {
        let result = CheckResult::new("conntrack", "conntrack check is ok")
            .with_variable("nf_conntrack_count", "120")
            .with_variable("big", 9_999_999_999i64);
        let output = RaxMaasFormatter::new().format(&result).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "status okay conntrack check is ok");
        assert_eq!(lines[1], "metric big int64 9999999999");
        assert_eq!(lines[2], "metric nf_conntrack_count int32 120");
    }
}
