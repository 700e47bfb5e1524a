//! Retry with exponential backoff for search API calls

use std::time::{Duration, SystemTime};

/// Retry policy for search API calls
///
/// Controls how many attempts a failed request gets and how long to
/// wait between them using exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first)
    pub max_attempts: u32,
    /// Base delay between retries (doubles each attempt)
    pub base_delay: Duration,
    /// Maximum delay cap
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

/// Determine whether an HTTP status indicates a recoverable error.
///
/// Recoverable errors are worth retrying: rate limits (429) and server
/// errors (5xx). Client errors (4xx) will fail identically on every
/// attempt and are not retried.
#[must_use]
pub const fn is_recoverable_status(status: u16) -> bool {
    status == 429 || (status >= 500 && status < 600)
}

/// Determine whether a transport-level failure is worth retrying.
///
/// Timeouts and connection failures are transient; request-building
/// errors are not.
#[must_use]
pub fn is_recoverable_transport(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

/// Compute the delay before the next retry attempt.
///
/// The delay follows exponential backoff:
/// `min(base_delay * 2^attempt + jitter, max_delay)`. Jitter is 0-25%
/// of the computed delay, derived from `SystemTime` subsecond nanos to
/// avoid pulling in a random number generator.
#[must_use]
pub fn delay_for_attempt(policy: &RetryPolicy, attempt: u32) -> Duration {
    let base = policy
        .base_delay
        .saturating_mul(2u32.saturating_pow(attempt));
    let base = base.min(policy.max_delay);

    let jitter_nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();

    // Scale to 0-25% of the base delay
    let jitter_fraction = f64::from(jitter_nanos % 250) / 1000.0;
    let jitter = base.mul_f64(jitter_fraction);

    (base + jitter).min(policy.max_delay)
}
