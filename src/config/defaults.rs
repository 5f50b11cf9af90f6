//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Lakipay API base URL, shared by sandbox and production.
pub const API_BASE_URL: &str = "https://api.lakipay.co";

/// Default environment name.
pub const ENVIRONMENT: &str = "sandbox";

/// Default per-attempt timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default number of retries after the first attempt.
pub const RETRIES: u32 = 2;

/// Default base backoff in milliseconds.
pub const BACKOFF_MS: u64 = 300;

/// Default output path for `init`.
pub const CONFIG_FILE: &str = "lakipay.toml";

/// Default per-attempt timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default base backoff as Duration.
#[must_use]
pub const fn backoff() -> Duration {
    Duration::from_millis(BACKOFF_MS)
}
