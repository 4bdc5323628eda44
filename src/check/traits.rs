//! Check trait
//!
//! A check gathers one measurement and returns it as a [`CheckResult`]. Checks
//! never abort the process: every failure is reported through the result's
//! exit code and message.

use crate::app::context::RunContext;
use crate::check::result::CheckResult;
use clap::{ArgMatches, Command};

pub trait Check: Send + Sync {
    /// Subcommand name
    fn name(&self) -> &'static str;

    /// One line description shown in `--help`
    fn about(&self) -> &'static str;

    /// Add check specific arguments to the check's subcommand
    fn configure(&self, cmd: Command) -> Command {
        cmd
    }

    /// Run the check with the arguments parsed for its subcommand
    fn run(&self, ctx: &RunContext, matches: &ArgMatches) -> CheckResult;
}
