//! Lakipay command-line client
//!
//! Entry point for the lakipay application.

use lakipay::config::{Cli, Command, ValidatedConfig, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use run::RunError;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let Some(command) = cli.command.as_ref() else {
        eprintln!("No command given. Run 'lakipay --help' for usage.");
        return exit_code::CONFIG_ERROR;
    };

    // Handle init subcommand
    if let Command::Init { output } = command {
        return handle_init(output);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => return report_config_error(&e),
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_command(command, &config)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

fn report_config_error(error: &lakipay::config::ConfigError) -> ExitCode {
    eprintln!("Configuration error: {error}");
    print_config_hint(error);
    exit_code::CONFIG_ERROR
}

/// Runs an API-facing command with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_command(command: &Command, config: &ValidatedConfig) -> ExitCode {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    let result = runtime.block_on(async {
        match command {
            Command::Transaction { id } => run::transaction(config, id).await,
            Command::VerifyWebhook { body, .. } => {
                run::verify_webhook(config, body.as_deref()).await
            }
            Command::Init { .. } => Ok(()),
        }
    });

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(RunError::Config(e)) => report_config_error(&e),
        Err(e) => {
            tracing::error!("{e}");
            exit_code::runtime_error()
        }
    }
}
