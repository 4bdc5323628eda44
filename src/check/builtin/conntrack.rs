//! Connection tracking table usage

use crate::app::context::RunContext;
use crate::check::error::{CheckError, CheckOutcome};
use crate::check::result::{CheckResult, Variables};
use crate::check::traits::Check;
use crate::output::value::MetricValue;
use clap::ArgMatches;
use std::path::PathBuf;

const NETFILTER_DIR: &str = "/proc/sys/net/netfilter";
const KEYS: [&str; 2] = ["nf_conntrack_count", "nf_conntrack_max"];

pub struct ConntrackCheck {
    dir: PathBuf,
}

impl ConntrackCheck {
    pub fn new() -> Self {
        Self::with_dir(NETFILTER_DIR)
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read(&self) -> CheckOutcome<Variables> {
        KEYS.iter()
            .map(|key| -> CheckOutcome<(String, MetricValue)> {
                let path = self.dir.join(key);
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| CheckError::Read { path, source })?;
                Ok((key.to_string(), text.trim().into()))
            })
            .collect()
    }
}

impl Default for ConntrackCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for ConntrackCheck {
    fn name(&self) -> &'static str {
        "conntrack"
    }

    fn about(&self) -> &'static str {
        "Get current maximum conntrack table sizes."
    }

    fn run(&self, _ctx: &RunContext, _matches: &ArgMatches) -> CheckResult {
        let mut result = CheckResult::new("conntrack", "conntrack check is ok");
        match self.read() {
            Ok(variables) => result.variables = variables,
            Err(e) => {
                log::debug!("conntrack read failed: {}", e);
                result.fail(
                    1,
                    "Unable to read conntrack data -- is the kernel module loaded?",
                );
            }
        }
        result
    }
}

crate::check!(|| Box::new(ConntrackCheck::new()));
