//! Arguments shared by several checks

use crate::app::context::RunContext;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "openstack.toml";

/// Add `--config-file FILE` (default `openstack.toml`)
pub fn config_file_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("config-file")
            .long("config-file")
            .value_name("FILE")
            .default_value(DEFAULT_CONFIG_FILE)
            .value_parser(clap::value_parser!(PathBuf))
            .help("OpenStack configuration file"),
    )
}

/// Config file named on the command line, relative to the working directory
pub fn config_file(ctx: &RunContext, matches: &ArgMatches) -> PathBuf {
    let path = matches
        .try_get_one::<PathBuf>("config-file")
        .ok()
        .flatten()
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if path.is_absolute() {
        path
    } else {
        ctx.home.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> ArgMatches {
        config_file_arg(Command::new("os"))
            .try_get_matches_from(argv)
            .unwrap()
    }

    fn context(home: &str) -> RunContext {
        RunContext {
            home: PathBuf::from(home),
            ..RunContext::default()
        }
    }

    #[test]
    fn test_default_resolves_against_home() {
        let path = config_file(&context("/srv/monitor"), &parse(&["os"]));
        assert_eq!(path, PathBuf::from("/srv/monitor/openstack.toml"));
    }

    #[test]
    fn test_absolute_path_is_kept() {
        let matches = parse(&["os", "--config-file", "/etc/monitorstack/os.toml"]);
        let path = config_file(&context("/srv/monitor"), &matches);
        assert_eq!(path, PathBuf::from("/etc/monitorstack/os.toml"));
    }

    #[test]
    fn test_without_argument_falls_back_to_default() {
        let path = config_file(&context("/tmp"), &ArgMatches::default());
        assert_eq!(path, PathBuf::from("/tmp/openstack.toml"));
    }
}
