//! Diagnostic logging
//!
//! All diagnostics go to stderr (or a log file); stdout is reserved for the
//! rendered check result.

use std::sync::{Mutex, OnceLock};

static LOGGER_HANDLE: OnceLock<Mutex<flexi_logger::LoggerHandle>> = OnceLock::new();

/// Level used when `--verbose` is given without an explicit lower level
pub const VERBOSE_LEVEL: &str = "debug";

/// Default level when nothing else is configured
pub const DEFAULT_LEVEL: &str = "warn";

/// Log formats accepted by `--log-format`
pub const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

/// Resolve the effective level from an explicit level and the verbose flag.
/// Verbose raises the level to at least debug; it never lowers it.
pub fn effective_level(log_level: Option<&str>, verbose: bool) -> String {
    let level = log_level.unwrap_or(DEFAULT_LEVEL).to_lowercase();
    if verbose && !matches!(level.as_str(), "debug" | "trace") {
        VERBOSE_LEVEL.to_string()
    } else {
        level
    }
}

/// Whether [`init_logging`] has already started a logger
pub fn is_initialized() -> bool {
    LOGGER_HANDLE.get().is_some()
}

pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let level_str = log_level.unwrap_or(DEFAULT_LEVEL);
    let mut logger = Logger::try_with_str(level_str)?;

    logger = match (log_format.unwrap_or("text"), color_enabled) {
        ("json", _) => logger.format(json_format),
        ("ext", true) => logger.format(extended_color_format),
        ("ext", false) => logger.format(extended_format),
        (_, true) => logger.format(simple_color_format),
        (_, false) => logger.format(simple_format),
    };

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));

    Ok(())
}

/// Change the active level after startup.
///
/// Only the level can change at runtime; format, file and color are fixed
/// when the logger starts.
pub fn reconfigure_logging(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("Logger handle not initialised. Call init_logging first.")?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| "Could not acquire logger handle lock")?;
    handle.parse_and_push_temp_spec(log_level)?;
    Ok(())
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn level_colored(level: log::Level) -> colored::ColoredString {
    use colored::Colorize;

    match level {
        log::Level::Error => "ERR".red().bold(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Info => "INF".green(),
        log::Level::Debug => "DBG".blue(),
        log::Level::Trace => "TRC".magenta(),
    }
}

const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// `YYYY-MM-DD HH:mm:ss.fff LVL message`, followed by the source location
/// `(check/builtin/kvm.rs:42)` when `located`
fn write_text(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
    color: bool,
    located: bool,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    let stamp = now.format(TIMESTAMP).to_string();
    if color {
        write!(w, "{} {} {}", stamp.dimmed(), level_colored(record.level()), record.args())?;
    } else {
        write!(w, "{} {} {}", stamp, level_abbr(record.level()), record.args())?;
    }

    if located {
        let location = format_target_as_path(record.target(), record.line());
        if color {
            write!(w, " ({})", location.dimmed())?;
        } else {
            write!(w, " ({})", location)?;
        }
    }
    Ok(())
}

fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write_text(w, now, record, false, false)
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write_text(w, now, record, true, false)
}

fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write_text(w, now, record, false, true)
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write_text(w, now, record, true, true)
}

/// One JSON object per record; field order follows the struct
#[derive(serde::Serialize)]
struct JsonLine<'a> {
    timestamp: String,
    level: &'a str,
    message: String,
    target: String,
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let line = JsonLine {
        timestamp: now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        level: level_abbr(record.level()),
        message: record.args().to_string(),
        target: format_target_as_path(record.target(), record.line()),
    };
    serde_json::to_writer(&mut *w, &line).map_err(std::io::Error::from)
}

/// `monitorstack::check::builtin::kvm` -> `check/builtin/kvm.rs:<line>`
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix("monitorstack::") {
        Some(without_prefix) => without_prefix.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };

    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}
