//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API credentials and target
    #[serde(default)]
    pub api: ApiSection,

    /// Transport tuning
    #[serde(default)]
    pub http: HttpSection,

    /// Webhook verification
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// API configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Merchant API key
    pub api_key: Option<String>,

    /// "sandbox" or "production"
    pub environment: Option<String>,

    /// Base URL override
    pub base_url: Option<String>,
}

/// HTTP configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Per-attempt timeout in seconds (fractions allowed)
    pub timeout: Option<f64>,

    /// Retries after the first attempt
    pub retries: Option<u32>,

    /// Base backoff in milliseconds
    pub backoff_ms: Option<u64>,

    /// Log every request and response
    #[serde(default)]
    pub log_requests: bool,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// PEM file holding the Lakipay public key
    pub public_key: Option<PathBuf>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Lakipay client configuration

[api]
# Merchant API key (required for API calls, can be overridden by --api-key)
# api_key = "sk_test_..."

# Target environment: "sandbox" or "production" (default: sandbox)
environment = "sandbox"

# Base URL override (default: https://api.lakipay.co)
# base_url = "https://api.lakipay.co"

[http]
# Per-attempt timeout in seconds, fractions allowed (default: 30)
timeout = 30.0

# Retries after the first attempt (default: 2)
retries = 2

# Base backoff in milliseconds, doubled on every retry (default: 300)
backoff_ms = 300

# Log every request and response
# log_requests = false

[webhook]
# PEM file holding the Lakipay public key used to verify notifications
# public_key = "lakipay_public.pem"
"#
    .to_string()
}
