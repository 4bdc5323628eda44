//! Process presence check

use crate::app::context::RunContext;
use crate::check::result::CheckResult;
use crate::check::traits::Check;
use crate::core::platform::platform;
use clap::{Arg, ArgMatches, Command};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

/// Source of the command lines of running processes
pub trait ProcessTable: Send + Sync {
    /// Space joined command lines, excluding this process and its parent
    fn cmdlines(&self) -> Vec<String>;
}

/// Live process table read through `sysinfo`
#[derive(Debug, Default)]
pub struct SystemProcesses;

impl ProcessTable for SystemProcesses {
    fn cmdlines(&self) -> Vec<String> {
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cmd(UpdateKind::Always),
        );

        let current = sysinfo::get_current_pid().ok();
        let parent = current
            .and_then(|pid| system.process(pid))
            .and_then(|p| p.parent());

        system
            .processes()
            .iter()
            .filter(|(pid, _)| Some(**pid) != current && Some(**pid) != parent)
            .map(|(_, process)| {
                process
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

pub struct ProcessCheck {
    table: Box<dyn ProcessTable>,
}

impl ProcessCheck {
    pub fn new() -> Self {
        Self::with_table(Box::new(SystemProcesses))
    }

    pub fn with_table(table: Box<dyn ProcessTable>) -> Self {
        Self { table }
    }

    /// Whether any command line contains `name`
    pub fn is_running(&self, name: &str) -> bool {
        self.table.cmdlines().iter().any(|cmdline| cmdline.contains(name))
    }
}

impl Default for ProcessCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for ProcessCheck {
    fn name(&self) -> &'static str {
        "process"
    }

    fn about(&self) -> &'static str {
        "Check if a process is running."
    }

    fn configure(&self, cmd: Command) -> Command {
        cmd.arg(
            Arg::new("process_name")
                .value_name("PROCESS_NAME")
                .required(true)
                .help("Text to look for in process command lines"),
        )
    }

    fn run(&self, _ctx: &RunContext, matches: &ArgMatches) -> CheckResult {
        let name = matches
            .get_one::<String>("process_name")
            .map(String::as_str)
            .unwrap_or_default();
        let mut result =
            CheckResult::new("process", "process check is ok").with_meta("platform", platform());

        if self.is_running(name) {
            result.insert_variable(name, 1);
        } else {
            result.fail(1, format!("process failed -- Process {} not found", name));
            result.insert_variable(name, 0);
        }
        result
    }
}

crate::check!(|| Box::new(ProcessCheck::new()));
