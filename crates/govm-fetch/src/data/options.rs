use std::fmt;
use std::time::Duration;

use crate::core::retry_delay;

/// Phases of a download operation.
///
/// Connecting → Downloading → Completed. Retries return to Connecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// Request sent, waiting for response headers.
    #[default]
    Connecting,

    /// Streaming the body into the cache file.
    Downloading,

    /// Cache file holds the full artifact (also reported on a cache hit).
    Completed,
}

impl fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchPhase::Connecting => write!(f, "Connecting"),
            FetchPhase::Downloading => write!(f, "Downloading"),
            FetchPhase::Completed => write!(f, "Completed"),
        }
    }
}

/// Delay schedule between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed(Duration),
    /// `base * 2^retry`.
    Exponential { base: Duration },
}

/// How many times to attempt a request and how long to wait in between.
///
/// Only transport failures consume attempts. A response with an unexpected
/// status is returned to the caller immediately.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use govm_fetch::RetryPolicy;
///
/// let policy = RetryPolicy::fixed(5, Duration::from_secs(2));
/// assert_eq!(policy.delay(3), Duration::from_secs(2));
///
/// let policy = RetryPolicy::exponential(5, Duration::from_millis(100));
/// assert_eq!(policy.delay(2), Duration::from_millis(400));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Zero is treated as one.
    pub max_attempts: u32,
    pub backoff:      Backoff,
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, backoff: Backoff::Fixed(delay) }
    }

    pub fn exponential(max_attempts: u32, base: Duration) -> Self {
        Self { max_attempts, backoff: Backoff::Exponential { base } }
    }

    pub fn attempts(&self) -> u32 { self.max_attempts.max(1) }

    /// Delay before retry number `retry` (0 = the first retry).
    pub fn delay(&self, retry: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { base } => retry_delay(retry, base),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self { Self::fixed(3, Duration::from_secs(1)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_attempts_still_tries_once() {
        assert_eq!(RetryPolicy::fixed(0, Duration::ZERO).attempts(), 1);
    }

    #[test]
    fn fixed_delay_is_constant() {
        let policy = RetryPolicy::fixed(4, Duration::from_millis(250));
        assert!((0..4).all(|n| policy.delay(n) == Duration::from_millis(250)));
    }

    #[test]
    fn exponential_delay_doubles() {
        let policy = RetryPolicy::exponential(4, Duration::from_millis(10));
        assert_eq!(policy.delay(0), Duration::from_millis(10));
        assert_eq!(policy.delay(3), Duration::from_millis(80));
    }
}
