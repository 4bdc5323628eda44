//! Compute resources in use per project

use crate::app::context::RunContext;
use crate::check::api::fail_with;
use crate::check::args::config_file_arg;
use crate::check::builtin::os_common::connect;
use crate::check::error::CheckOutcome;
use crate::check::result::{CheckResult, Meta, Variables};
use crate::check::traits::Check;
use crate::openstack::types::{Flavor, Server};
use crate::output::value::MetricValue;
use clap::{ArgMatches, Command};
use std::collections::BTreeMap;

const SERVICE: &str = "nova";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Cores,
    Disk,
    Instances,
    Ram,
}

impl Usage {
    pub fn check_name(&self) -> &'static str {
        match self {
            Usage::Cores => "os_vm_used_cores",
            Usage::Disk => "os_vm_used_disk",
            Usage::Instances => "os_vm_used_instance",
            Usage::Ram => "os_vm_used_ram",
        }
    }

    /// Value of the `used` tag
    pub fn label(&self) -> &'static str {
        match self {
            Usage::Cores => "cores",
            Usage::Disk => "disk",
            Usage::Instances => "instances",
            Usage::Ram => "ram",
        }
    }

    /// What one server with `flavor` adds to its project's total
    fn amount(&self, flavor: Option<&Flavor>) -> i64 {
        match (self, flavor) {
            (Usage::Instances, _) => 1,
            (Usage::Cores, Some(f)) => f.vcpus,
            (Usage::Disk, Some(f)) => f.disk,
            (Usage::Ram, Some(f)) => f.ram,
            (_, None) => 0,
        }
    }
}

pub struct UsedCheck {
    usage: Usage,
}

impl UsedCheck {
    pub fn new(usage: Usage) -> Self {
        Self { usage }
    }
}

/// Sum `usage` per project and tag every flavor seen by id and name
pub fn tally<F>(
    usage: Usage,
    servers: &[Server],
    flavors: &BTreeMap<String, Flavor>,
    mut project_name: F,
) -> CheckOutcome<(Meta, Variables)>
where
    F: FnMut(&str) -> CheckOutcome<String>,
{
    let mut meta = Meta::new();
    let mut totals: BTreeMap<String, i64> = BTreeMap::new();

    for server in servers {
        let project = project_name(&server.tenant_id)?;
        let flavor = server.flavor.id.as_deref().and_then(|id| flavors.get(id));
        match flavor {
            Some(f) => {
                meta.insert(f.id.clone(), MetricValue::from(true));
                meta.insert(f.name.clone(), MetricValue::from(true));
            }
            None => {
                log::warn!("server {} has an unknown flavor", server.id);
                if let Some(name) = &server.flavor.original_name {
                    meta.insert(name.clone(), MetricValue::from(true));
                }
            }
        }
        *totals.entry(project).or_insert(0) += usage.amount(flavor);
    }

    let variables = totals
        .into_iter()
        .map(|(project, total)| (project, MetricValue::from(total)))
        .collect();
    Ok((meta, variables))
}

impl Check for UsedCheck {
    fn name(&self) -> &'static str {
        self.usage.check_name()
    }

    fn about(&self) -> &'static str {
        match self.usage {
            Usage::Cores => "Get nova used cores.",
            Usage::Disk => "Get nova used disk.",
            Usage::Instances => "Get nova used instances.",
            Usage::Ram => "Get nova used ram.",
        }
    }

    fn configure(&self, cmd: Command) -> Command {
        config_file_arg(cmd)
    }

    fn run(&self, ctx: &RunContext, matches: &ArgMatches) -> CheckResult {
        let name = self.name();
        let mut result = CheckResult::new(name, format!("{} is ok", name))
            .with_meta("used", self.usage.label());

        let outcome = (|| -> CheckOutcome<(Meta, Variables)> {
            let cloud = connect(ctx, matches, SERVICE, false)?;
            let flavors = cloud.flavors()?;
            let servers = cloud.servers()?;
            ctx.vlog(&format!("{} servers, {} flavors", servers.len(), flavors.len()));
            tally(self.usage, &servers, &flavors, |id| Ok(cloud.project_name(id)?))
        })();

        match outcome {
            Ok((meta, variables)) => {
                for (key, value) in meta {
                    result.insert_meta(key, value);
                }
                result.variables = variables;
            }
            Err(e) => fail_with(&mut result, name, &e),
        }
        result
    }
}

crate::check!(|| Box::new(UsedCheck::new(Usage::Cores)));
crate::check!(|| Box::new(UsedCheck::new(Usage::Disk)));
crate::check!(|| Box::new(UsedCheck::new(Usage::Instances)));
crate::check!(|| Box::new(UsedCheck::new(Usage::Ram)));
