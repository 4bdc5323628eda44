//! memcached statistics via the text protocol `stats` command

use crate::app::context::RunContext;
use crate::check::api::fail_with;
use crate::check::error::{CheckError, CheckOutcome};
use crate::check::result::{CheckResult, Variables};
use crate::check::traits::Check;
use crate::output::value::MetricValue;
use clap::{value_parser, Arg, ArgMatches, Command};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 11211;
const TIMEOUT: Duration = Duration::from_secs(5);

/// Numeric stat text becomes a number; versions and the like stay text
fn stat_value(raw: &str) -> MetricValue {
    if let Ok(i) = raw.parse::<i64>() {
        MetricValue::Int(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        MetricValue::Float(f)
    } else {
        MetricValue::from(raw)
    }
}

/// Parse a `stats` reply up to its `END` line
pub fn parse_stats<R: BufRead>(reader: R) -> CheckOutcome<Variables> {
    let mut stats = Variables::new();
    for line in reader.lines() {
        let line = line.map_err(|e| CheckError::Protocol(e.to_string()))?;
        let line = line.trim_end();
        if line == "END" {
            return Ok(stats);
        }
        let mut parts = line.splitn(3, ' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("STAT"), Some(key), Some(value)) => {
                stats.insert(key.to_string(), stat_value(value));
            }
            _ => return Err(CheckError::Protocol(format!("unexpected reply '{}'", line))),
        }
    }
    Err(CheckError::Protocol("connection closed before END".to_string()))
}

pub fn get_memcached_stats(host: &str, port: u16) -> CheckOutcome<Variables> {
    let address = format!("{}:{}", host, port);
    let connect_err = |source| CheckError::Connect {
        address: address.clone(),
        source,
    };

    let socket = address
        .to_socket_addrs()
        .map_err(connect_err)?
        .next()
        .ok_or_else(|| {
            connect_err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no address resolved",
            ))
        })?;
    let mut stream = TcpStream::connect_timeout(&socket, TIMEOUT).map_err(connect_err)?;
    stream.set_read_timeout(Some(TIMEOUT)).map_err(connect_err)?;
    stream.write_all(b"stats\r\n").map_err(connect_err)?;

    parse_stats(BufReader::new(stream))
}

#[derive(Debug, Default)]
pub struct MemcacheCheck;

impl Check for MemcacheCheck {
    fn name(&self) -> &'static str {
        "memcache"
    }

    fn about(&self) -> &'static str {
        "Get memcached stats."
    }

    fn configure(&self, cmd: Command) -> Command {
        cmd.arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .default_value(DEFAULT_HOST)
                .help("memcached host to query"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .default_value("11211")
                .value_parser(value_parser!(u16))
                .help("memcached server port"),
        )
    }

    fn run(&self, ctx: &RunContext, matches: &ArgMatches) -> CheckResult {
        let host = matches
            .get_one::<String>("host")
            .map(String::as_str)
            .unwrap_or(DEFAULT_HOST);
        let port = matches.get_one::<u16>("port").copied().unwrap_or(DEFAULT_PORT);
        ctx.vlog(&format!("querying memcached at {}:{}", host, port));

        let mut result = CheckResult::new("memcache", "memcached is ok");
        match get_memcached_stats(host, port) {
            Ok(stats) => result.variables = stats,
            Err(e) => fail_with(&mut result, "memcache", &e),
        }
        result
    }
}

crate::check!(|| Box::new(MemcacheCheck));
