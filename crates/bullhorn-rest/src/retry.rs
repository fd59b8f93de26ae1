//! Status-keyed retry policy applied at the transport layer.
//!
//! Retries are transparent to the session client: it observes only the
//! final outcome of a request, whether that took one attempt or several.

use std::time::Duration;

use tokio_retry::strategy::FixedInterval;

/// Maximum retry attempts after the initial request.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Fixed delay between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Response statuses considered transient and worth retrying.
pub const DEFAULT_RETRY_STATUSES: [u16; 3] = [429, 500, 503];

/// Retry policy keyed on response status.
///
/// A request whose response status is in the retry set is re-issued after
/// a fixed delay, up to the configured ceiling. Any other status, and any
/// connection-level failure, propagates immediately.
///
/// # Example
///
/// ```
/// use bullhorn_rest::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert!(policy.should_retry(503));
/// assert!(!policy.should_retry(404));
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: usize,
    delay: Duration,
    statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
            statuses: DEFAULT_RETRY_STATUSES.to_vec(),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with a custom ceiling, delay, and status set.
    pub fn new(max_retries: usize, delay: Duration, statuses: impl Into<Vec<u16>>) -> Self {
        Self {
            max_retries,
            delay,
            statuses: statuses.into(),
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
            statuses: Vec::new(),
        }
    }

    /// Returns the retry ceiling (attempts after the initial request).
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Returns the fixed delay between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a response with this status should be retried.
    pub fn should_retry(&self, status: u16) -> bool {
        self.statuses.contains(&status)
    }

    /// Creates the fixed-interval delay sequence for one request.
    ///
    /// Returns a strategy iterator ready for use with
    /// `tokio_retry::RetryIf`, limited to `max_retries` entries.
    pub(crate) fn strategy(&self) -> std::iter::Take<FixedInterval> {
        FixedInterval::new(self.delay).take(self.max_retries)
    }
}
