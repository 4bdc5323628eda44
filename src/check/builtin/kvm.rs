//! KVM hypervisor metrics, read through a read-only `virsh` connection

use crate::app::context::RunContext;
use crate::check::command::{CommandRunner, SystemCommandRunner};
use crate::check::error::{CheckError, CheckOutcome};
use crate::check::result::CheckResult;
use crate::check::traits::Check;
use crate::core::platform::{hostname, platform};
use clap::ArgMatches;
use sha2::{Digest, Sha256};

/// Stable, non-negative identifier derived from the host name
pub fn kvm_host_id(host: &str) -> i64 {
    let digest = Sha256::digest(host.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(bytes) >> 1) as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HypervisorStats {
    pub vms: i64,
    pub total_vcpus: i64,
    pub scheduled_vcpus: i64,
}

pub struct KvmCheck {
    runner: Box<dyn CommandRunner>,
}

impl KvmCheck {
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemCommandRunner))
    }

    pub fn with_runner(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn virsh(&self, args: &[&str]) -> CheckOutcome<String> {
        let mut full = vec!["-r"];
        full.extend_from_slice(args);
        self.runner.run("virsh", &full)?.into_stdout("virsh")
    }

    fn parse_count(what: &str, text: &str) -> CheckOutcome<i64> {
        text.trim()
            .parse::<i64>()
            .map_err(|_| CheckError::parse(what, text.trim()))
    }

    pub fn collect(&self) -> CheckOutcome<HypervisorStats> {
        let domains: Vec<String> = self
            .virsh(&["list", "--id"])?
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();

        let nodeinfo = self.virsh(&["nodeinfo"])?;
        let cpus = nodeinfo
            .lines()
            .find_map(|line| line.strip_prefix("CPU(s):"))
            .ok_or_else(|| CheckError::parse("virsh nodeinfo", nodeinfo.trim()))?;
        let total_vcpus = Self::parse_count("host CPU count", cpus)?;

        let mut scheduled_vcpus = 0;
        for domain in &domains {
            let vcpus = self.virsh(&["vcpucount", domain, "--maximum", "--live"])?;
            scheduled_vcpus += Self::parse_count("domain vcpu count", &vcpus)?;
        }

        Ok(HypervisorStats {
            vms: domains.len() as i64,
            total_vcpus,
            scheduled_vcpus,
        })
    }
}

impl Default for KvmCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for KvmCheck {
    fn name(&self) -> &'static str {
        "kvm"
    }

    fn about(&self) -> &'static str {
        "Get metrics from a KVM hypervisor."
    }

    fn run(&self, _ctx: &RunContext, _matches: &ArgMatches) -> CheckResult {
        let mut result = CheckResult::new("kvm", "kvm is ok")
            .with_meta("platform", platform())
            .with_meta("kvm_host_id", kvm_host_id(&hostname()));

        match self.collect() {
            Ok(stats) => {
                result.insert_variable("kvm_vms", stats.vms);
                result.insert_variable("kvm_total_vcpus", stats.total_vcpus);
                result.insert_variable("kvm_scheduled_vcpus", stats.scheduled_vcpus);
            }
            Err(e) => {
                log::error!("kvm collection failed: {}", e);
                result.fail(1, format!("kvm failed -- Error: {}", e));
            }
        }
        result
    }
}

crate::check!(|| Box::new(KvmCheck::new()));
