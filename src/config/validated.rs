//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use super::cli::{Cli, Command};
use super::client::{ClientConfig, Environment};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// The API key stays optional here: only commands that call the API
/// require it, through [`ValidatedConfig::client_config`].
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Clone)]
pub struct ValidatedConfig {
    /// Merchant API key
    pub api_key: Option<String>,

    /// Target environment
    pub environment: Environment,

    /// Base URL override
    pub base_url: Option<Url>,

    /// Per-attempt timeout
    pub timeout: Duration,

    /// Retries after the first attempt
    pub retries: u32,

    /// Base backoff between retries
    pub backoff: Duration,

    /// Request/response logging enabled
    pub log_requests: bool,

    /// PEM file with the webhook public key
    pub public_key: Option<PathBuf>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValidatedConfig({self})")
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base_url = self
            .base_url
            .as_ref()
            .map_or(self.environment.base_url(), Url::as_str);
        let public_key = self
            .public_key
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ environment: {}, base_url: {}, api_key: {}, timeout: {:?}, \
             retry: {}x/{}ms, log_requests: {}, public_key: {} }}",
            self.environment,
            base_url,
            if self.api_key.is_some() { "set" } else { "unset" },
            self.timeout,
            self.retries,
            self.backoff.as_millis(),
            self.log_requests,
            public_key,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The environment name is unknown
    /// - The base URL is invalid
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .clone()
            .or_else(|| toml.and_then(|t| t.api.api_key.clone()))
            .filter(|key| !key.trim().is_empty());

        let environment = Self::resolve_environment(cli, toml)?;
        let base_url = Self::resolve_base_url(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;

        let retries = cli
            .retries
            .or_else(|| toml.and_then(|t| t.http.retries))
            .unwrap_or(defaults::RETRIES);

        let backoff_ms = cli
            .backoff_ms
            .or_else(|| toml.and_then(|t| t.http.backoff_ms))
            .unwrap_or(defaults::BACKOFF_MS);

        // Flags only enable
        let log_requests = cli.log_requests || toml.is_some_and(|t| t.http.log_requests);

        let public_key = Self::resolve_public_key(cli, toml);

        Ok(Self {
            api_key,
            environment,
            base_url,
            timeout,
            retries,
            backoff: Duration::from_millis(backoff_ms),
            log_requests,
            public_key,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Builds the API client settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no API key was given.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::API_KEY,
                "Use --api-key or set api.api_key in config file",
            )
        })?;

        let mut config = ClientConfig::new(api_key)
            .with_environment(self.environment)
            .with_timeout(self.timeout)
            .with_retries(self.retries)
            .with_backoff(self.backoff)
            .with_request_logging(self.log_requests);
        config.base_url.clone_from(&self.base_url);

        Ok(config)
    }

    /// Returns the webhook public key path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if none was given.
    pub fn public_key_path(&self) -> Result<&Path, ConfigError> {
        self.public_key.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::PUBLIC_KEY,
                "Use --public-key or set webhook.public_key in config file",
            )
        })
    }

    fn resolve_environment(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Environment, ConfigError> {
        // CLI takes precedence
        if let Some(environment) = cli.environment {
            return Ok(environment);
        }

        toml.and_then(|t| t.api.environment.as_deref())
            .unwrap_or(defaults::ENVIRONMENT)
            .parse()
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Option<Url>, ConfigError> {
        let Some(url_str) = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.base_url.as_deref()))
        else {
            return Ok(None);
        };

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "cannot be used as a base URL".to_string(),
            });
        }

        Ok(Some(url))
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let Some(seconds) = cli.timeout.or_else(|| toml.and_then(|t| t.http.timeout)) else {
            return Ok(defaults::timeout());
        };

        let timeout =
            Duration::try_from_secs_f64(seconds).map_err(|e| ConfigError::InvalidDuration {
                field: "timeout",
                reason: e.to_string(),
            })?;

        if timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(timeout)
    }

    fn resolve_public_key(cli: &Cli, toml: Option<&TomlConfig>) -> Option<PathBuf> {
        if let Some(Command::VerifyWebhook {
            public_key: Some(path),
            ..
        }) = &cli.command
        {
            return Some(path.clone());
        }

        toml.and_then(|t| t.webhook.public_key.clone())
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
