//! Application startup
//!
//! Parse the command line, merge the settings file, start logging, run the
//! selected check and render its result on stdout. Everything that goes wrong
//! before the check runs is reported on stderr with a non-zero exit code and
//! leaves stdout empty.

use crate::app::cli::args::{parse_from, Options};
use crate::app::cli::settings::load_settings;
use crate::app::context::RunContext;
use crate::check::api::find_check;
use crate::core::error_handling::{error_chain_message, log_error_with_context};
use crate::core::logging::{init_logging, is_initialized, reconfigure_logging};
use crate::core::styles::StyleRole;
use crate::output::dispatch::render_all;
use std::ffi::OsString;
use std::io::{IsTerminal, Write};

/// Exit code for usage and configuration errors
pub const CONFIG_ERROR_EXIT: i32 = 2;

/// Run with the process arguments, writing to stdout
pub fn startup() -> i32 {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(std::env::args_os(), &mut out)
}

/// Run with explicit arguments and output; returns the process exit code
pub fn run<I, T, W>(argv: I, out: &mut W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let (args, matches) = match parse_from(argv) {
        Ok(parsed) => parsed,
        Err(e) => {
            // help and version go to stdout, usage errors to stderr
            let _ = e.print();
            return e.exit_code();
        }
    };

    let settings = match load_settings(args.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => return config_error(&e),
    };
    let options = match args.resolve(&settings) {
        Ok(options) => options,
        Err(e) => return config_error(&e),
    };

    start_logging(&options);
    log::debug!("Options: {:?}", options);

    let Some((name, check_matches)) = matches.subcommand() else {
        return config_error(&std::io::Error::other("no check given"));
    };
    let Some(check) = find_check(name) else {
        eprintln!("Module \"{}\" Not Found.", name);
        return CONFIG_ERROR_EXIT;
    };

    let ctx = RunContext::new(options.verbose, options.cache.clone());
    ctx.vlog(&format!("running {} with {} output", name, options.format));
    let result = check.run(&ctx, check_matches);

    match render_all(options.format, std::slice::from_ref(&result), out) {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context(&e, "Failed to write check result");
            1
        }
    }
}

fn config_error(error: &dyn std::error::Error) -> i32 {
    let enabled = std::io::stderr().is_terminal();
    eprintln!(
        "{} {}",
        StyleRole::Error.paint("Error:", enabled),
        error_chain_message(error)
    );
    CONFIG_ERROR_EXIT
}

fn start_logging(options: &Options) {
    let outcome = if is_initialized() {
        reconfigure_logging(&options.log_level)
    } else {
        let log_file = options.log_file.as_ref().map(|p| p.to_string_lossy().to_string());
        init_logging(
            Some(&options.log_level),
            Some(&options.log_format),
            log_file.as_deref(),
            options.color,
        )
    };
    if let Err(e) = outcome {
        eprintln!("Warning: could not start logging: {}", e);
    }
}
