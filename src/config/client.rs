//! Settings for a Lakipay API client.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::HeaderMap;
use url::Url;

use crate::api::RetryPolicy;

use super::defaults;
use super::error::ConfigError;

/// Header carrying the merchant API key.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Target Lakipay environment.
///
/// Both environments currently share one base URL; the key decides which
/// account is charged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Test account, no real money moves
    #[default]
    Sandbox,
    /// Live account
    Production,
}

impl Environment {
    /// Returns the lowercase name used in config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }

    /// Returns the API base URL for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox | Self::Production => defaults::API_BASE_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment {
                value: s.to_string(),
            }),
        }
    }
}

/// Settings needed to talk to the Lakipay API.
///
/// # Example
///
/// ```
/// use lakipay::config::{ClientConfig, Environment};
/// use std::time::Duration;
///
/// let config = ClientConfig::new("sk_test_123")
///     .with_environment(Environment::Production)
///     .with_retries(4)
///     .with_backoff(Duration::from_millis(100));
///
/// assert_eq!(config.retry_policy().max_attempts(), 5);
/// assert_eq!(config.resolved_base_url().unwrap().as_str(), "https://api.lakipay.co/");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Merchant API key sent as `X-API-Key`
    pub api_key: String,
    /// Target environment
    pub environment: Environment,
    /// Overrides the environment's base URL
    pub base_url: Option<Url>,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Retries after the first attempt
    pub retries: u32,
    /// Base backoff, doubled on every retry
    pub backoff: Duration,
    /// Log every request and response at INFO
    pub log_requests: bool,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("backoff", &self.backoff)
            .field("log_requests", &self.log_requests)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a config with the given key and default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            environment: Environment::default(),
            base_url: None,
            timeout: defaults::timeout(),
            retries: defaults::RETRIES,
            backoff: defaults::backoff(),
            log_requests: false,
        }
    }

    /// Sets the environment.
    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of retries.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the base backoff.
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Enables or disables request logging.
    #[must_use]
    pub const fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    /// Returns the base URL requests are sent to.
    ///
    /// An explicit base URL wins over the environment default. Trailing
    /// slashes are trimmed so endpoint paths append cleanly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL cannot carry a path.
    pub fn resolved_base_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .base_url
            .as_ref()
            .map_or(self.environment.base_url(), Url::as_str);
        let trimmed = raw.trim_end_matches('/');

        let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: raw.to_string(),
                reason: "cannot be used as a base URL".to_string(),
            });
        }

        Ok(url)
    }

    /// Builds the retry policy for the request engine.
    ///
    /// # Panics
    ///
    /// Panics if `timeout` is zero.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_retries(self.retries)
            .with_base_backoff(self.backoff)
            .with_timeout(self.timeout)
    }

    /// Builds the headers sent with every API call.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeaderValue`] if the API key contains
    /// characters not allowed in a header.
    pub fn default_headers(&self) -> Result<HeaderMap, ConfigError> {
        let mut api_key =
            HeaderValue::from_str(&self.api_key).map_err(|e| ConfigError::InvalidHeaderValue {
                name: "X-API-Key",
                reason: e.to_string(),
            })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}
