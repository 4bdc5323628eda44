//! Neutron agent liveness

use crate::app::context::RunContext;
use crate::check::api::fail_with;
use crate::check::args::config_file_arg;
use crate::check::builtin::os_common::connect;
use crate::check::error::CheckOutcome;
use crate::check::result::CheckResult;
use crate::check::traits::Check;
use crate::openstack::types::NetworkAgent;
use clap::{ArgMatches, Command};

const SERVICE: &str = "neutron";
const NAME: &str = "os_neutron_agents";

pub struct NeutronAgentsCheck;

impl NeutronAgentsCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NeutronAgentsCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for NeutronAgentsCheck {
    fn name(&self) -> &'static str {
        NAME
    }

    fn about(&self) -> &'static str {
        "Get neutron agent status."
    }

    fn configure(&self, cmd: Command) -> Command {
        config_file_arg(cmd)
    }

    fn run(&self, ctx: &RunContext, matches: &ArgMatches) -> CheckResult {
        let mut result = CheckResult::new(NAME, format!("{} is ok", NAME)).with_meta(
            "agent: is_alive",
            "Neutron service agent and if it is alive",
        );

        let outcome = (|| -> CheckOutcome<Vec<NetworkAgent>> {
            let cloud = connect(ctx, matches, SERVICE, false)?;
            Ok(cloud.network_agents()?)
        })();

        match outcome {
            Ok(agents) => {
                // one variable per binary; the last agent reported wins
                for agent in agents {
                    ctx.vlog(&format!("{} on {} alive={}", agent.binary, agent.host, agent.alive));
                    result.insert_variable(agent.binary, agent.alive);
                }
            }
            Err(e) => fail_with(&mut result, NAME, &e),
        }
        result
    }
}

crate::check!(|| Box::new(NeutronAgentsCheck::new()));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::context::CacheSettings;
    use crate::openstack::tests::MockCloud;
    use crate::output::value::MetricValue;
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

    fn matches() -> ArgMatches {
        NeutronAgentsCheck::new()
            .configure(Command::new(NAME))
            .try_get_matches_from([NAME])
            .unwrap()
    }

    #[test]
    fn test_agents_alive_flags() {
        let dir = TempDir::new().unwrap();
        let mut cloud = MockCloud::new();
        cloud.write_config(dir.path());
        cloud.get(
            "/network/v2.0/agents",
            json!({"agents": [
                {"binary": "neutron-dhcp-agent", "alive": true, "host": "net1"},
                {"binary": "neutron-l3-agent", "alive": false, "host": "net1"}
            ]}),
        );

        let result = NeutronAgentsCheck::new().run(&context(&dir), &matches());
        assert_eq!(result.exit_code, 0, "{}", result.message);
        assert_eq!(result.message, "os_neutron_agents is ok");
        assert_eq!(result.variables["neutron-dhcp-agent"], MetricValue::from(true));
        assert_eq!(result.variables["neutron-l3-agent"], MetricValue::from(false));
        assert!(result.meta.unwrap().contains_key("agent: is_alive"));
    }

    #[test]
    fn test_endpoint_failure_reports_chain() {
        let dir = TempDir::new().unwrap();
        let mut cloud = MockCloud::new();
        cloud.write_config(dir.path());
        cloud
            .server
            .mock("GET", "/network/v2.0/agents")
            .with_status(500)
            .with_body("boom")
            .create();

        let result = NeutronAgentsCheck::new().run(&context(&dir), &matches());
        assert_eq!(result.exit_code, 1);
        assert!(result.message.starts_with("os_neutron_agents failed -- Exception ["));
    }
}
