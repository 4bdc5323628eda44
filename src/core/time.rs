//! Time provider abstraction for testable time-dependent logic

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Abstraction over the wall clock
pub trait TimeProvider: Send + Sync {
    /// Get the current system time (for timestamps)
    fn system_time(&self) -> SystemTime;

    /// Current time as integer nanoseconds since the epoch.
    ///
    /// The field is nanosecond scaled; actual resolution is whatever the
    /// platform clock delivers.
    fn timestamp_nanos(&self) -> u128 {
        self.system_time()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    }

    /// Current time as whole seconds since the epoch
    fn timestamp_secs(&self) -> u64 {
        self.system_time()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Production time provider using actual system time
#[derive(Debug, Default, Clone)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Time provider pinned to one instant, for deterministic output
#[derive(Debug, Clone)]
pub struct FixedTimeProvider {
    at: SystemTime,
}

impl FixedTimeProvider {
    pub fn new(at: SystemTime) -> Self {
        Self { at }
    }

    /// Pin the clock `nanos` nanoseconds after the epoch
    pub fn from_nanos(nanos: u64) -> Self {
        Self::new(UNIX_EPOCH + Duration::from_nanos(nanos))
    }
}

impl TimeProvider for FixedTimeProvider {
    fn system_time(&self) -> SystemTime {
        self.at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_is_positive() {
        let provider = SystemTimeProvider;
        assert!(provider.timestamp_nanos() > 0);
        assert!(provider.timestamp_secs() > 0);
    }

    #[test]
    fn test_fixed_provider_is_stable() {
        let provider = FixedTimeProvider::from_nanos(1_500_000_000_123_456_789);
        assert_eq!(provider.timestamp_nanos(), 1_500_000_000_123_456_789);
        assert_eq!(provider.timestamp_secs(), 1_500_000_000);
        assert_eq!(provider.timestamp_nanos(), provider.timestamp_nanos());
    }

    #[test]
    fn test_before_epoch_is_zero() {
        let provider = FixedTimeProvider::new(UNIX_EPOCH - Duration::from_secs(10));
        assert_eq!(provider.timestamp_nanos(), 0);
    }
}
