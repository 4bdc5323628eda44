//! Command line arguments
//!
//! Global options are declared with the clap derive API; the check
//! subcommands are added from the registry with the builder API, so a new
//! check only has to register itself.

use crate::app::cli::settings::Settings;
use crate::app::context::CacheSettings;
use crate::check::api::registered_checks;
use crate::core::cache::DEFAULT_TTL;
use crate::core::logging::effective_level;
use crate::core::styles::palette_to_clap;
use crate::core::version::long_version;
use crate::output::error::OutputResult;
use crate::output::traits::OutputFormat;
use clap::{ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

pub const COMMAND_NAME: &str = "monitorstack";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = COMMAND_NAME)]
#[command(about = "Gather metrics from the local host and OpenStack services")]
#[command(version)]
pub struct Args {
    /// Output format (json, line, telegraf, rax-maas)
    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        env = "MONITORSTACK_FORMAT",
        global = true
    )]
    pub format: Option<String>,

    /// Enable verbose mode
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::SetTrue,
        env = "MONITORSTACK_VERBOSE",
        global = true
    )]
    pub verbose: bool,

    /// Log level
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        env = "MONITORSTACK_LOG_LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error", "off"]
    )]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(
        long = "log-format",
        value_name = "FORMAT",
        env = "MONITORSTACK_LOG_FORMAT",
        value_parser = ["text", "ext", "json"]
    )]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(long = "log-file", value_name = "FILE", env = "MONITORSTACK_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored log output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,

    /// Settings file path
    #[arg(long = "settings", value_name = "FILE", env = "MONITORSTACK_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Directory of the local name cache
    #[arg(long = "cache-dir", value_name = "DIR", env = "MONITORSTACK_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Lifetime of cache entries in seconds
    #[arg(long = "cache-ttl", value_name = "SECONDS", env = "MONITORSTACK_CACHE_TTL")]
    pub cache_ttl: Option<u64>,
}

/// Global options after merging the command line with the settings file
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub format: OutputFormat,
    pub verbose: bool,
    /// Effective log level, already raised by `verbose`
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<PathBuf>,
    pub color: bool,
    pub cache: CacheSettings,
}

impl Args {
    /// `--color` / `--no-color`, or `None` when neither was given
    pub fn color_choice(&self) -> Option<bool> {
        if self.no_color {
            Some(false)
        } else if self.color {
            Some(true)
        } else {
            None
        }
    }

    /// Merge with the settings file; command line and environment win
    pub fn resolve(&self, settings: &Settings) -> OutputResult<Options> {
        let format = self
            .format
            .clone()
            .or_else(|| settings.format.clone())
            .map(|name| name.parse::<OutputFormat>())
            .transpose()?
            .unwrap_or_default();

        let verbose = self.verbose || settings.verbose.unwrap_or(false);
        let log_level = effective_level(
            self.log_level.as_deref().or(settings.log_level.as_deref()),
            verbose,
        );
        let log_format = self
            .log_format
            .clone()
            .or_else(|| settings.log_format.clone())
            .unwrap_or_else(|| "text".to_string());
        let color = self
            .color_choice()
            .or(settings.color)
            .unwrap_or_else(|| std::io::stderr().is_terminal());
        let ttl = self
            .cache_ttl
            .or(settings.cache_ttl)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TTL);

        Ok(Options {
            format,
            verbose,
            log_level,
            log_format,
            log_file: self.log_file.clone().or_else(|| settings.log_file.clone()),
            color,
            cache: CacheSettings {
                dir: self.cache_dir.clone().or_else(|| settings.cache_dir.clone()),
                ttl,
            },
        })
    }
}

/// Full command: global options plus one subcommand per registered check
pub fn build_cli() -> Command {
    let color = std::io::stdout().is_terminal();
    let mut cmd = Args::command()
        .long_version(long_version())
        .styles(palette_to_clap(color))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .allow_external_subcommands(true)
        .subcommand_value_name("CHECK")
        .subcommand_help_heading("Checks");

    for check in registered_checks() {
        cmd = cmd.subcommand(check.configure(Command::new(check.name()).about(check.about())));
    }
    cmd
}

/// Parse `argv`, returning the global options and the raw matches that carry
/// the selected check's subcommand
pub fn parse_from<I, T>(argv: I) -> Result<(Args, ArgMatches), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_cli().try_get_matches_from(argv)?;
    let args = Args::from_arg_matches(&matches)?;
    Ok((args, matches))
}
