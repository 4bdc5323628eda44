//! Compute quotas per project

use crate::app::context::RunContext;
use crate::check::api::fail_with;
use crate::check::args::config_file_arg;
use crate::check::builtin::os_common::connect;
use crate::check::error::{CheckError, CheckOutcome};
use crate::check::result::CheckResult;
use crate::check::traits::Check;
use crate::output::value::MetricValue;
use clap::{ArgMatches, Command};

const SERVICE: &str = "nova";

/// One quota of the compute quota set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    Cores,
    Instances,
    Ram,
}

impl Quota {
    pub fn check_name(&self) -> &'static str {
        match self {
            Quota::Cores => "os_vm_quota_cores",
            Quota::Instances => "os_vm_quota_instance",
            Quota::Ram => "os_vm_quota_ram",
        }
    }

    /// Key in the compute quota set
    pub fn key(&self) -> &'static str {
        match self {
            Quota::Cores => "cores",
            Quota::Instances => "instances",
            Quota::Ram => "ram",
        }
    }
}

pub struct QuotaCheck {
    quota: Quota,
}

impl QuotaCheck {
    pub fn new(quota: Quota) -> Self {
        Self { quota }
    }
}

/// Quota values arrive as numbers or numeric strings
fn quota_value(quota: Quota, value: Option<&serde_json::Value>) -> CheckOutcome<i64> {
    let parsed = match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        let shown = value.map(|v| v.to_string()).unwrap_or_default();
        CheckError::parse(format!("{} quota", quota.key()), shown)
    })
}

impl Check for QuotaCheck {
    fn name(&self) -> &'static str {
        self.quota.check_name()
    }

    fn about(&self) -> &'static str {
        match self.quota {
            Quota::Cores => "Get nova cores quotas.",
            Quota::Instances => "Get nova instance quotas.",
            Quota::Ram => "Get nova ram quotas.",
        }
    }

    fn configure(&self, cmd: Command) -> Command {
        config_file_arg(cmd)
    }

    fn run(&self, ctx: &RunContext, matches: &ArgMatches) -> CheckResult {
        let name = self.name();
        let mut result = CheckResult::new(name, format!("{} is ok", name))
            .with_meta("quotas", self.quota.key());

        let outcome = (|| -> CheckOutcome<Vec<(String, i64)>> {
            let cloud = connect(ctx, matches, SERVICE, false)?;
            let mut quotas = Vec::new();
            for project in cloud.projects()? {
                let limits = cloud.compute_limits(&project.id)?;
                quotas.push((project.name, quota_value(self.quota, limits.get(self.quota.key()))?));
            }
            Ok(quotas)
        })();

        match outcome {
            Ok(quotas) => {
                for (project, value) in quotas {
                    result.insert_variable(project, MetricValue::from(value));
                }
            }
            Err(e) => fail_with(&mut result, name, &e),
        }
        result
    }
}

crate::check!(|| Box::new(QuotaCheck::new(Quota::Cores)));
crate::check!(|| Box::new(QuotaCheck::new(Quota::Instances)));
crate::check!(|| Box::new(QuotaCheck::new(Quota::Ram)));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::context::CacheSettings;
    use crate::openstack::tests::MockCloud;
    use serde_json::json;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> RunContext {
        RunContext {
            verbose: false,
            home: dir.path().to_path_buf(),
            cache: CacheSettings {
                dir: Some(dir.path().join("cache")),
                ..CacheSettings::default()
            },
        }
    }

    fn matches(check: &QuotaCheck) -> ArgMatches {
        check
            .configure(Command::new(check.name()))
            .try_get_matches_from([check.name()])
            .unwrap()
    }

    #[test]
    fn test_quota_per_project_name() {
        let dir = TempDir::new().unwrap();
        let mut cloud = MockCloud::new();
        cloud.write_config(dir.path());
        cloud.projects();
        cloud.get(
            "/compute/v2.1/os-quota-sets/p1",
            json!({"quota_set": {"cores": 20, "instances": 10, "ram": 51200}}),
        );
        cloud.get(
            "/compute/v2.1/os-quota-sets/p2",
            json!({"quota_set": {"cores": "8", "instances": 4, "ram": 8192}}),
        );

        let check = QuotaCheck::new(Quota::Cores);
        let result = check.run(&context(&dir), &matches(&check));

        assert_eq!(result.exit_code, 0, "{}", result.message);
        assert_eq!(result.message, "os_vm_quota_cores is ok");
        assert_eq!(result.measurement_name, "os_vm_quota_cores");
        assert_eq!(result.variables["admin"], MetricValue::from(20));
        assert_eq!(result.variables["demo"], MetricValue::from(8));
        assert_eq!(
            result.meta.unwrap().get("quotas"),
            Some(&MetricValue::from("cores"))
        );
    }

    #[test]
    fn test_instance_quota_uses_instances_key() {
        let dir = TempDir::new().unwrap();
        let mut cloud = MockCloud::new();
        cloud.write_config(dir.path());
        cloud.get("/identity/v3/projects", json!({"projects": [{"id": "p1", "name": "admin"}]}));
        cloud.get(
            "/compute/v2.1/os-quota-sets/p1",
            json!({"quota_set": {"cores": 20, "instances": 10, "ram": 51200}}),
        );

        let check = QuotaCheck::new(Quota::Instances);
        let result = check.run(&context(&dir), &matches(&check));
        assert_eq!(result.measurement_name, "os_vm_quota_instance");
        assert_eq!(result.variables["admin"], MetricValue::from(10));
    }

    #[test]
    fn test_missing_config_fails_the_check() {
        let dir = TempDir::new().unwrap();
        let check = QuotaCheck::new(Quota::Ram);
        let result = check.run(&context(&dir), &matches(&check));
        assert_eq!(result.exit_code, 1);
        assert!(result.message.starts_with("os_vm_quota_ram failed -- "));
        assert!(result.variables.is_empty());
    }

    #[test]
    fn test_quota_value_parsing() {
        assert_eq!(quota_value(Quota::Ram, Some(&json!(-1))).unwrap(), -1);
        assert_eq!(quota_value(Quota::Ram, Some(&json!("12"))).unwrap(), 12);
        assert!(quota_value(Quota::Ram, Some(&json!("lots"))).is_err());
        assert!(quota_value(Quota::Ram, None).is_err());
    }
}
