//! Retry policy configuration for API calls.

use std::time::Duration;

/// Exponential backoff and timeout settings shared by every call.
///
/// Configured once when the client is built and read-only afterwards.
///
/// # Defaults
///
/// - `max_retries`: 2 (three attempts in total)
/// - `base_backoff`: 300 milliseconds
/// - `timeout`: 30 seconds per attempt
///
/// # Example
///
/// ```
/// use lakipay::api::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(3)
///     .with_base_backoff(Duration::from_millis(300));
///
/// assert_eq!(policy.delay_for_retry(0), Duration::from_millis(300));
/// assert_eq!(policy.delay_for_retry(2), Duration::from_millis(1200));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    ///
    /// Zero means a single attempt.
    pub max_retries: u32,

    /// Delay before the first retry; doubled for each later retry.
    pub base_backoff: Duration,

    /// Upper bound on a single attempt, from send to fully buffered body.
    pub timeout: Duration,
}

impl RetryPolicy {
    /// Default number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 2;

    /// Default base backoff (300 milliseconds).
    pub const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(300);

    /// Default per-attempt timeout (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_backoff: Self::DEFAULT_BASE_BACKOFF,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the base backoff.
    ///
    /// Zero is accepted and makes retries back-to-back.
    #[must_use]
    pub const fn with_base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// Sets the per-attempt timeout.
    ///
    /// # Panics
    ///
    /// Panics if `timeout` is zero.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "timeout must be greater than zero");
        self.timeout = timeout;
        self
    }

    /// Total number of attempts, including the initial one.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Computes the delay after failed attempt `retry` (0-indexed).
    ///
    /// Equals `base_backoff * 2^retry`, saturating at [`Duration::MAX`].
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.base_backoff.saturating_mul(factor)
    }

    /// Returns true if another attempt may follow failed attempt `attempt`
    /// (0-indexed).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
