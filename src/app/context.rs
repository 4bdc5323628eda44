//! Per-invocation context handed to every check

use crate::core::cache::{CacheResult, LocalCache, DEFAULT_TTL};
use std::path::PathBuf;
use std::time::Duration;

/// Where the local cache lives and how long entries stay valid
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Cache directory; `None` means `~/.cache/monitorstack.cache`
    pub dir: Option<PathBuf>,
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: None,
            ttl: DEFAULT_TTL,
        }
    }
}

impl CacheSettings {
    pub fn local_cache(&self) -> CacheResult<LocalCache> {
        Ok(LocalCache::new(self.dir.clone())?.with_ttl(self.ttl))
    }
}

/// Built once at startup and passed by reference to the selected check
#[derive(Debug, Clone)]
pub struct RunContext {
    pub verbose: bool,
    /// Working directory the command was started from
    pub home: PathBuf,
    pub cache: CacheSettings,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            verbose: false,
            home: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            cache: CacheSettings::default(),
        }
    }
}

impl RunContext {
    pub fn new(verbose: bool, cache: CacheSettings) -> Self {
        Self {
            verbose,
            cache,
            ..Self::default()
        }
    }

    /// Log a message to stderr
    pub fn log(&self, msg: &str) {
        log::info!("{}", msg);
    }

    /// Log a message only in verbose mode
    pub fn vlog(&self, msg: &str) {
        if self.verbose {
            log::debug!("{}", msg);
        }
    }
}
