//! LVM volume group capacity

use crate::app::context::RunContext;
use crate::check::command::{CommandRunner, SystemCommandRunner};
use crate::check::error::{CheckError, CheckOutcome};
use crate::check::result::CheckResult;
use crate::check::traits::Check;
use crate::core::error_handling::error_chain_message;
use crate::core::platform::platform;
use clap::{Arg, ArgMatches, Command};

/// Size and free space of a volume group in MiB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeGroupSize {
    pub total: i64,
    pub free: i64,
}

/// Parse `vgs --noheadings --units M --nosuffix -o vg_size,vg_free` output
pub fn parse_vgs(output: &str) -> CheckOutcome<VolumeGroupSize> {
    let sizes = output
        .split_whitespace()
        .map(|field| {
            field
                .parse::<f64>()
                .map(|v| v.trunc() as i64)
                .map_err(|_| CheckError::parse("vgs size", field))
        })
        .collect::<CheckOutcome<Vec<i64>>>()?;

    match sizes.as_slice() {
        [total, free] => Ok(VolumeGroupSize {
            total: *total,
            free: *free,
        }),
        _ => Err(CheckError::parse("vgs output", output.trim())),
    }
}

pub struct VgCheck {
    runner: Box<dyn CommandRunner>,
}

impl VgCheck {
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemCommandRunner))
    }

    pub fn with_runner(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn volume_group_size(&self, name: &str) -> CheckOutcome<VolumeGroupSize> {
        let output = self.runner.run(
            "vgs",
            &[
                name,
                "--noheadings",
                "--units",
                "M",
                "--nosuffix",
                "-o",
                "vg_size,vg_free",
            ],
        )?;
        parse_vgs(&output.into_stdout("vgs")?)
    }
}

impl Default for VgCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for VgCheck {
    fn name(&self) -> &'static str {
        "vg_check"
    }

    fn about(&self) -> &'static str {
        "Check a given volume group"
    }

    fn configure(&self, cmd: Command) -> Command {
        cmd.arg(
            Arg::new("volume_group")
                .long("volume_group")
                .value_name("NAME")
                .required(true)
                .help("Name of the volume group"),
        )
    }

    fn run(&self, _ctx: &RunContext, matches: &ArgMatches) -> CheckResult {
        let vg = matches
            .get_one::<String>("volume_group")
            .map(String::as_str)
            .unwrap_or_default();
        let mut result = CheckResult::new(
            "vg_check",
            format!("vg_check check for volume group {} is ok", vg),
        )
        .with_meta("platform", platform());

        match self.volume_group_size(vg) {
            Ok(size) => {
                result.insert_variable(format!("vg_{}_total_size_M", vg), size.total);
                result.insert_variable(format!("vg_{}_free_M", vg), size.free);
                result.insert_variable(format!("vg_{}_used_M", vg), size.total - size.free);
            }
            Err(e) => {
                let code = match &e {
                    CheckError::CommandFailed { code, .. } => *code,
                    _ => 1,
                };
                result.fail(
                    code,
                    format!("vg_check for {} failed -- {}", vg, error_chain_message(&e)),
                );
            }
        }
        result
    }
}

crate::check!(|| Box::new(VgCheck::new()));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::command::fake::FakeRunner;
    use crate::output::value::MetricValue;

    const VGS: &str = "vgs cinder-volumes --noheadings --units M --nosuffix -o vg_size,vg_free";

    fn run(runner: FakeRunner) -> CheckResult {
        let check = VgCheck::with_runner(Box::new(runner));
        let matches = check
            .configure(Command::new("vg_check"))
            .try_get_matches_from(["vg_check", "--volume_group", "cinder-volumes"])
            .unwrap();
        check.run(&RunContext::default(), &matches)
    }

    #[test]
    fn test_parse_vgs() {
        assert_eq!(
            parse_vgs("  58.00 1.99\n").unwrap(),
            VolumeGroupSize { total: 58, free: 1 }
        );
        assert!(parse_vgs("58.00").is_err());
        assert!(parse_vgs("a b").is_err());
    }

    #[test]
    fn test_success_variables() {
        let result = run(FakeRunner::default().with(VGS, 0, "  58.00 1.00\n", ""));
        assert_eq!(result.exit_code, 0);
        assert_eq!(
            result.message,
            "vg_check check for volume group cinder-volumes is ok"
        );
        assert_eq!(result.variables["vg_cinder-volumes_total_size_M"], MetricValue::Int(58));
        assert_eq!(result.variables["vg_cinder-volumes_free_M"], MetricValue::Int(1));
        assert_eq!(result.variables["vg_cinder-volumes_used_M"], MetricValue::Int(57));
    }

    #[test]
    fn test_vgs_exit_code_is_propagated() {
        let result = run(FakeRunner::default().with(
            VGS,
            5,
            "",
            "  Volume group \"cinder-volumes\" not found\n",
        ));
        assert_eq!(result.exit_code, 5);
        assert!(result.message.starts_with("vg_check for cinder-volumes failed -- "));
        assert!(result.message.contains("Volume group \"cinder-volumes\" not found"));
        assert!(result.variables.is_empty());
    }

    #[test]
    fn test_missing_vgs_binary() {
        let result = run(FakeRunner::default());
        assert_eq!(result.exit_code, 1);
        assert!(result.message.contains("Cannot run vgs"));
    }

    #[test]
    fn test_volume_group_is_required() {
        let check = VgCheck::with_runner(Box::new(FakeRunner::default()));
        assert!(check
            .configure(Command::new("vg_check"))
            .try_get_matches_from(["vg_check"])
            .is_err());
    }
}
