//! External command execution for checks that shell out (`vgs`, `virsh`)

use crate::check::error::{CheckError, CheckOutcome};
use std::process::Command;

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Stdout of a successful run, or [`CheckError::CommandFailed`]
    pub fn into_stdout(self, program: &str) -> CheckOutcome<String> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(CheckError::CommandFailed {
                program: program.to_string(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Runs a program with arguments and captures its output
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> CheckOutcome<CommandOutput>;
}

/// Runs commands on the local host
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> CheckOutcome<CommandOutput> {
        log::debug!("Running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| CheckError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            // Killed by a signal: report a generic failure
            code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
