//! Output dispatch
//!
//! Routes check results to the formatter selected with `--format` and folds
//! their exit codes into the process exit status.

use crate::check::result::CheckResult;
use crate::output::error::OutputResult;
use crate::output::formats::get_formatter;
use crate::output::traits::{OutputFormat, OutputFormatter};
use std::io::Write;

/// Render one result with the formatter for `format`
pub fn write_result<W: Write>(
    format: OutputFormat,
    result: &CheckResult,
    writer: &mut W,
) -> OutputResult<()> {
    write_with(get_formatter(format).as_ref(), result, writer)
}

/// Render one result with an explicit formatter
pub fn write_with<W: Write>(
    formatter: &dyn OutputFormatter,
    result: &CheckResult,
    writer: &mut W,
) -> OutputResult<()> {
    let text = formatter.format(result)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    log::debug!(
        "Wrote {} output for {} ({} bytes)",
        formatter.format_type(),
        result.measurement_name,
        text.len()
    );
    Ok(())
}

/// Render every result in order and return the worst exit code
pub fn render_all<W: Write>(
    format: OutputFormat,
    results: &[CheckResult],
    writer: &mut W,
) -> OutputResult<i32> {
    render_all_with(get_formatter(format).as_ref(), results, writer)
}

pub fn render_all_with<W: Write>(
    formatter: &dyn OutputFormatter,
    results: &[CheckResult],
    writer: &mut W,
) -> OutputResult<i32> {
    for result in results {
        write_with(formatter, result, writer)?;
    }
    Ok(worst_exit_code(results))
}

/// Largest exit code of `results`, `0` when there are none
pub fn worst_exit_code(results: &[CheckResult]) -> i32 {
    results.iter().map(|r| r.exit_code).max().unwrap_or(0)
}
