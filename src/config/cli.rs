//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::client::Environment;
use super::defaults;

/// Lakipay: command-line client for the Lakipay payment API
///
/// Looks up transactions and verifies webhook notifications.
#[derive(Debug, Parser)]
#[command(name = "lakipay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Merchant API key
    #[arg(long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// Target environment
    #[arg(long, value_enum, ignore_case = true, global = true)]
    pub environment: Option<Environment>,

    /// Override the API base URL
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Per-attempt timeout in seconds (fractions allowed)
    #[arg(long, global = true)]
    pub timeout: Option<f64>,

    /// Retries after the first attempt
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Base backoff between retries in milliseconds
    #[arg(long = "backoff-ms", global = true)]
    pub backoff_ms: Option<u64>,

    /// Log every request and response
    #[arg(long = "log-requests", global = true)]
    pub log_requests: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for lakipay
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Fetch one transaction and print it as JSON
    Transaction {
        /// Transaction id
        id: String,
    },

    /// Verify a webhook notification and print its payload
    VerifyWebhook {
        /// PEM file holding the Lakipay public key
        #[arg(long = "public-key")]
        public_key: Option<PathBuf>,

        /// File holding the raw request body (stdin when omitted)
        #[arg(long)]
        body: Option<PathBuf>,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
