//! Shared plumbing of the OpenStack checks

use crate::app::context::RunContext;
use crate::check::args::config_file;
use crate::check::error::{CheckError, CheckOutcome};
use crate::core::config::{read_config, ConfigError, ServiceConfig};
use crate::openstack::OpenStack;
use clap::ArgMatches;
use std::path::Path;

/// Section used when the service specific one is absent
pub const CLOUD_SECTION: &str = "cloud";

/// Load `service` from the config file, falling back to `[cloud]` when allowed
pub fn load_service(path: &Path, service: &str, allow_cloud: bool) -> CheckOutcome<ServiceConfig> {
    let config = read_config(path)?;
    match config.section(service) {
        Ok(section) => Ok(section),
        Err(ConfigError::MissingSection(_)) if allow_cloud => Ok(config.section(CLOUD_SECTION)?),
        Err(e) => Err(CheckError::from(e)),
    }
}

/// Authenticated client for `service`, with project names cached locally
pub fn connect(
    ctx: &RunContext,
    matches: &ArgMatches,
    service: &str,
    allow_cloud: bool,
) -> CheckOutcome<OpenStack> {
    let path = config_file(ctx, matches);
    ctx.vlog(&format!("using {} section of {}", service, path.display()));
    let section = load_service(&path, service, allow_cloud)?;
    let cache = ctx.cache.local_cache()?;
    Ok(OpenStack::new(section)?.with_cache(cache))
}
