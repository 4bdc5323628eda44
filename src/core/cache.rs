//! Local disk cache
//!
//! A small JSON key/value store used to remember slow lookups (project names,
//! for instance) between runs. Each entry carries its insertion time and is
//! ignored once older than the cache TTL.

use crate::core::error_handling::ContextualError;
use crate::core::retry::{retry, RetryPolicy};
use crate::core::time::{SystemTimeProvider, TimeProvider};
use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// File holding the entries inside the cache directory
pub const CACHE_FILE: &str = "cache.json";

/// Default entry lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cannot access cache at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot encode cache entry '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No home directory available for the default cache location")]
    NoHome,
}

impl ContextualError for CacheError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, CacheError::NoHome)
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            CacheError::NoHome => Some("Set --cache-dir; no home directory was found"),
            _ => None,
        }
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    stored_at: DateTime<Utc>,
    value: serde_json::Value,
}

/// Location and policy of the on-disk cache
#[derive(Clone)]
pub struct LocalCache {
    path: PathBuf,
    ttl: Duration,
    policy: RetryPolicy,
    clock: Arc<dyn TimeProvider>,
}

impl std::fmt::Debug for LocalCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCache")
            .field("path", &self.path)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl LocalCache {
    /// Cache rooted at `path`, or `~/.cache/monitorstack.cache` when absent.
    /// A path whose name does not end in `cache` gets `.cache` appended.
    pub fn new(path: Option<PathBuf>) -> CacheResult<Self> {
        let path = match path {
            Some(path) => path,
            None => dirs::home_dir()
                .ok_or(CacheError::NoHome)?
                .join(".cache")
                .join("monitorstack.cache"),
        };

        Ok(Self {
            path: normalise_cache_path(path),
            ttl: DEFAULT_TTL,
            policy: RetryPolicy::default(),
            clock: Arc::new(SystemTimeProvider),
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_time_provider(mut self, clock: Arc<dyn TimeProvider>) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open the cache, creating its directory when needed
    pub fn open(&self) -> CacheResult<CacheHandle> {
        retry("open cache", &self.policy, || self.load())
    }

    fn load(&self) -> CacheResult<CacheHandle> {
        std::fs::create_dir_all(&self.path).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;

        let file = self.path.join(CACHE_FILE);
        let entries = match std::fs::read_to_string(&file) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable cache {}: {}", file.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(CacheError::Io { path: file, source }),
        };

        log::debug!("Opened cache {} ({} entries)", file.display(), entries.len());
        Ok(CacheHandle {
            file,
            entries,
            ttl: self.ttl,
            clock: Arc::clone(&self.clock),
            dirty: false,
            closed: false,
        })
    }
}

fn normalise_cache_path(path: PathBuf) -> PathBuf {
    if path.to_string_lossy().ends_with("cache") {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".cache");
        PathBuf::from(name)
    }
}

/// An open cache. Changes are written back on [`close`](CacheHandle::close)
/// or when the handle is dropped.
pub struct CacheHandle {
    file: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn TimeProvider>,
    dirty: bool,
    closed: bool,
}

impl CacheHandle {
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.clock.system_time())
    }

    fn max_age(&self) -> TimeDelta {
        TimeDelta::from_std(self.ttl).unwrap_or(TimeDelta::MAX)
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.now().signed_duration_since(entry.stored_at) <= self.max_age()
    }

    /// Fetch a live entry. Entries that no longer decode as `T` are treated as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key).filter(|e| self.is_fresh(e))?;
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> CacheResult<()> {
        let value = serde_json::to_value(value).map_err(|source| CacheError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: self.now(),
                value,
            },
        );
        self.dirty = true;
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|e| self.is_fresh(e))
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.dirty |= removed;
        removed
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.values().filter(|e| self.is_fresh(e)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Purge expired entries and write the cache back to disk
    pub fn close(mut self) -> CacheResult<()> {
        self.persist()
    }

    fn persist(&mut self) -> CacheResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let before = self.entries.len();
        let now = self.now();
        let max_age = self.max_age();
        self.entries
            .retain(|_, e| now.signed_duration_since(e.stored_at) <= max_age);
        if !self.dirty && before == self.entries.len() {
            return Ok(());
        }

        let text = serde_json::to_string(&self.entries).map_err(|source| CacheError::Encode {
            key: CACHE_FILE.to_string(),
            source,
        })?;
        let staging = self.file.with_extension("json.tmp");
        std::fs::write(&staging, text)
            .and_then(|_| std::fs::rename(&staging, &self.file))
            .map_err(|source| CacheError::Io {
                path: self.file.clone(),
                source,
            })
    }
}

impl Drop for CacheHandle {
    fn drop(&mut self) {
        if let Err(e) = self.persist() {
            log::warn!("Failed to write cache {}: {}", self.file.display(), e);
        }
    }
}
