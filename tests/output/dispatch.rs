//! Dispatch of results to a writer

use crate::common::uptime_result;
use monitorstack::check::CheckResult;
use monitorstack::output::{render_all, write_result, OutputError, OutputFormat};
use std::io::{self, Write};

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_results_render_in_order_with_worst_exit_code() {
    let mut failed = CheckResult::new("conntrack", "conntrack check is ok");
    failed.fail(1, "Unable to read conntrack data -- is the kernel module loaded?");
    let results = vec![uptime_result(), failed];

    let mut out = Vec::new();
    let code = render_all(OutputFormat::RaxMaas, &results, &mut out).unwrap();
    assert_eq!(code, 1);

    let text = String::from_utf8(out).unwrap();
    let statuses: Vec<&str> = text.lines().filter(|l| l.starts_with("status")).collect();
    assert_eq!(
        statuses,
        vec![
            "status okay uptime is ok",
            "status error Unable to read conntrack data -- is the kernel module loaded?"
        ]
    );
}

#[test]
fn test_no_results_is_success() {
    let mut out = Vec::new();
    assert_eq!(render_all(OutputFormat::Json, &[], &mut out).unwrap(), 0);
    assert!(out.is_empty());
}

#[test]
fn test_write_failure_surfaces_as_io_error() {
    let err = write_result(OutputFormat::Line, &uptime_result(), &mut BrokenPipe).unwrap_err();
    assert!(matches!(err, OutputError::Io(_)));
}
