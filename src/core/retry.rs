//! Retry utility for transient failures
//!
//! Blocking retries with a fixed number of attempts, a starting delay and a
//! multiplicative backoff between attempts.

use std::thread::sleep;
use std::time::Duration;

/// Retry policy: at most `tries` attempts, sleeping `delay` after the first
/// failure and multiplying the delay by `backoff` after each further failure
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub tries: u32,
    pub delay: Duration,
    pub backoff: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            tries: 3,
            delay: Duration::from_secs(1),
            backoff: 1,
        }
    }
}

impl RetryPolicy {
    pub fn new(tries: u32, delay: Duration, backoff: u32) -> Self {
        Self {
            tries,
            delay,
            backoff,
        }
    }

    /// Delays slept between consecutive attempts
    pub fn delays(&self) -> Vec<Duration> {
        let mut delays = Vec::new();
        let mut delay = self.delay;
        for _ in 1..self.tries.max(1) {
            delays.push(delay);
            delay *= self.backoff.max(1);
        }
        delays
    }
}

/// Run `operation` until it succeeds or the policy is exhausted.
///
/// Every failure but the last is logged as a warning; the final error is
/// returned unchanged. A policy with zero tries still makes one attempt.
///
/// # Examples
/// ```rust
/// use monitorstack::core::retry::{retry, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(2, Duration::from_millis(1), 1);
/// let value = retry("open cache", &policy, || Ok::<_, String>(7)).unwrap();
/// assert_eq!(value, 7);
/// ```
pub fn retry<F, T, E>(operation_name: &str, policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    let mut delays = policy.delays().into_iter();
    let attempts = policy.tries.max(1);
    let mut attempt = 1;

    loop {
        match operation() {
            Ok(result) => return Ok(result),
            Err(error) => match delays.next() {
                Some(delay) => {
                    log::warn!(
                        "{}, Retrying in {} seconds... (attempt {}/{})",
                        error,
                        delay.as_secs_f64(),
                        attempt,
                        attempts
                    );
                    log::debug!("Operation '{}' failed, retrying", operation_name);
                    sleep(delay);
                    attempt += 1;
                }
                None => return Err(error),
            },
        }
    }
}
