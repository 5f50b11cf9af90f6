//! Configuration layer for the Lakipay client.
//!
//! This module provides:
//! - API client settings ([`ClientConfig`], [`Environment`])
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The API key has no default. It is only required by commands that call
//! the API, so a missing key surfaces from [`ValidatedConfig::client_config`]
//! rather than from loading.
//!
//! `--log-requests` uses OR semantics: set in either source, it is on.

mod cli;
mod client;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use client::{API_KEY_HEADER, ClientConfig, Environment};
pub use error::{ConfigError, field};
pub use toml::{ApiSection, HttpSection, TomlConfig, WebhookSection, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
