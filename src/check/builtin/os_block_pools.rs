//! Block storage pool capacity

use crate::app::context::RunContext;
use crate::check::api::fail_with;
use crate::check::args::config_file_arg;
use crate::check::builtin::os_common::connect;
use crate::check::error::CheckOutcome;
use crate::check::result::CheckResult;
use crate::check::traits::Check;
use crate::openstack::types::Pool;
use crate::output::value::MetricValue;
use clap::{ArgMatches, Command};

const SERVICE: &str = "cinder";

/// `free` as a percentage of `total`; zero for empty pools.
///
/// Reported under the `*_percent_used` names that collectors already chart.
pub fn percent_used(total: f64, free: f64) -> f64 {
    if total > 0.0 {
        100.0 * free / total
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolReport {
    /// One set of capacities per pool
    Usage,
    /// Capacities summed over every pool
    Totals,
}

pub struct BlockPoolsCheck {
    report: PoolReport,
}

impl BlockPoolsCheck {
    pub fn new(report: PoolReport) -> Self {
        Self { report }
    }

    fn fill(&self, result: &mut CheckResult, pools: &[Pool]) {
        for pool in pools {
            result.insert_meta(pool.pool_name(), true);
        }

        match self.report {
            PoolReport::Usage => {
                for pool in pools {
                    let name = pool.pool_name();
                    let total = pool.capabilities.total_capacity_gb();
                    let free = pool.capabilities.free_capacity_gb();
                    result.insert_variable(format!("{}_free_capacity_gb", name), free);
                    result.insert_variable(format!("{}_total_capacity_gb", name), total);
                    result.insert_variable(
                        format!("{}_percent_used", name),
                        percent_used(total, free),
                    );
                }
            }
            PoolReport::Totals => {
                let total: f64 = pools.iter().map(|p| p.capabilities.total_capacity_gb()).sum();
                let free: f64 = pools.iter().map(|p| p.capabilities.free_capacity_gb()).sum();
                result.insert_variable("cinder_total_percent_used", percent_used(total, free));
                result.insert_variable("cinder_total_free_capacity", free);
                result.insert_variable("cinder_total_used_capacity", total - free);
                result.insert_variable("cinder_total_capacity", total);
            }
        }
    }
}

impl Check for BlockPoolsCheck {
    fn name(&self) -> &'static str {
        match self.report {
            PoolReport::Usage => "os_block_pools_usage",
            PoolReport::Totals => "os_block_pools_totals",
        }
    }

    fn about(&self) -> &'static str {
        match self.report {
            PoolReport::Usage => "Get block storage usage per pool.",
            PoolReport::Totals => "Get block storage totals across all pools.",
        }
    }

    fn configure(&self, cmd: Command) -> Command {
        config_file_arg(cmd)
    }

    fn run(&self, ctx: &RunContext, matches: &ArgMatches) -> CheckResult {
        let name = self.name();
        let tag = match self.report {
            PoolReport::Usage => "usage",
            PoolReport::Totals => "totals",
        };
        let mut result =
            CheckResult::new(name, format!("{} is ok", name)).with_meta("block_pools", tag);

        let outcome = (|| -> CheckOutcome<Vec<Pool>> {
            let cloud = connect(ctx, matches, SERVICE, true)?;
            Ok(cloud.volume_pool_stats()?)
        })();

        match outcome {
            Ok(pools) => self.fill(&mut result, &pools),
            Err(e) => fail_with(&mut result, name, &e),
        }
        result
    }
}

crate::check!(|| Box::new(BlockPoolsCheck::new(PoolReport::Usage)));
crate::check!(|| Box::new(BlockPoolsCheck::new(PoolReport::Totals)));
