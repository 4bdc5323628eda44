//! Exact text produced by each output format

use crate::common::uptime_result;
use monitorstack::check::CheckResult;
use monitorstack::core::time::FixedTimeProvider;
use monitorstack::output::formats::{get_formatter, TelegrafFormatter};
use monitorstack::output::{OutputFormat, OutputFormatter};

#[test]
fn test_json_round_trips() {
    let text = get_formatter(OutputFormat::Json)
        .format(&uptime_result())
        .unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.contains("\n  \"exit_code\": 0,"));

    let parsed: CheckResult = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, uptime_result());
}

#[test]
fn test_line() {
    let text = get_formatter(OutputFormat::Line)
        .format(&uptime_result())
        .unwrap();
    assert_eq!(text, "uptime 29587.75\n");
}

#[test]
fn test_telegraf_with_pinned_clock() {
    let formatter = TelegrafFormatter::with_time_provider(Box::new(
        FixedTimeProvider::from_nanos(1_600_000_000_000_000_000),
    ));
    let text = formatter.format(&uptime_result()).unwrap();
    assert_eq!(
        text,
        "system_uptime platform=example_platform uptime=29587.75 1600000000000000000\n"
    );
}

#[test]
fn test_telegraf_quotes_text_fields_only() {
    let result = CheckResult::new("os_neutron_agents", "os_neutron_agents is ok")
        .without_meta()
        .with_variable("neutron-l3-agent", true)
        .with_variable("state", "degraded");
    let formatter =
        TelegrafFormatter::with_time_provider(Box::new(FixedTimeProvider::from_nanos(7)));
    assert_eq!(
        formatter.format(&result).unwrap(),
        "os_neutron_agents neutron-l3-agent=1,state=\"degraded\" 7\n"
    );
}

#[test]
fn test_rax_maas() {
    let text = get_formatter(OutputFormat::RaxMaas)
        .format(&uptime_result())
        .unwrap();
    assert_eq!(text, "status okay uptime is ok\nmetric uptime float 29587.75\n");
}

#[test]
fn test_rax_maas_failure_with_units() {
    let mut result = CheckResult::new("vg_check", "ok")
        .with_variable("vg_cinder_free_M", 1024)
        .with_measurement_units("megabytes");
    result.fail(5, "vg_check for cinder failed");

    let text = get_formatter(OutputFormat::RaxMaas).format(&result).unwrap();
    assert_eq!(
        text,
        "status error vg_check for cinder failed\nmetric vg_cinder_free_M int32 1024 megabytes\n"
    );
}

#[test]
fn test_formats_by_name() {
    for name in ["json", "line", "telegraf", "rax-maas"] {
        let format: OutputFormat = name.parse().unwrap();
        assert_eq!(get_formatter(format).format_type(), format);
    }
    assert!("yaml".parse::<OutputFormat>().is_err());
}
