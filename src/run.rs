//! Command execution.
//!
//! Runs the API-facing subcommands. Results go to stdout as pretty JSON;
//! diagnostics go through `tracing`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::AsyncReadExt;

use lakipay::api::{ApiError, HttpClient};
use lakipay::config::{ConfigError, ValidatedConfig};
use lakipay::time::Sleeper;
use lakipay::webhook::{WebhookError, WebhookPayload, WebhookVerifier};
use lakipay::Lakipay;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The merged configuration cannot serve this command.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error("API call failed: {0}")]
    Api(#[from] ApiError),

    /// The webhook notification was rejected.
    #[error("Webhook rejected: {0}")]
    Webhook(#[from] WebhookError),

    /// Failed to read the request body.
    #[error("Failed to read webhook body from {source_name}: {source}")]
    Input {
        /// File path or `stdin`
        source_name: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to render the result.
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Fetches one transaction and prints it.
///
/// Excluded from coverage - performs real network I/O.
#[cfg(not(tarpaulin_include))]
pub async fn transaction(config: &ValidatedConfig, id: &str) -> Result<(), RunError> {
    let sdk = Lakipay::new(config.client_config()?)?;
    let rendered = fetch_transaction(&sdk, id).await?;
    println!("{rendered}");
    Ok(())
}

/// Verifies a webhook body and prints its payload.
///
/// Reads the body from `body` or, when absent, from stdin.
///
/// Excluded from coverage - reads stdin.
#[cfg(not(tarpaulin_include))]
pub async fn verify_webhook(config: &ValidatedConfig, body: Option<&Path>) -> Result<(), RunError> {
    let pem = read_public_key(config.public_key_path()?)?;
    let raw_body = read_body(body).await?;
    let rendered = check_webhook(&pem, &raw_body)?;
    println!("{rendered}");
    Ok(())
}

/// Fetches a transaction and renders it as pretty JSON.
async fn fetch_transaction<H: HttpClient, S: Sleeper>(
    sdk: &Lakipay<H, S>,
    id: &str,
) -> Result<String, RunError> {
    tracing::debug!("Fetching transaction {id}");
    let data = sdk.payments().get_transaction(id).await?;
    Ok(serde_json::to_string_pretty(&data)?)
}

/// Verifies `raw_body` against `pem` and renders the payload as pretty JSON.
fn check_webhook(pem: &str, raw_body: &[u8]) -> Result<String, RunError> {
    let verifier = WebhookVerifier::from_pem(pem)?;
    let payload: WebhookPayload = verifier.verify_and_parse(raw_body)?;
    tracing::info!("Webhook signature verified ({} field(s))", payload.len());
    Ok(serde_json::to_string_pretty(&payload)?)
}

fn read_public_key(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

async fn read_body(path: Option<&Path>) -> Result<Vec<u8>, RunError> {
    match path {
        Some(path) => read_body_file(path.to_path_buf()).await,
        None => {
            let mut body = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut body)
                .await
                .map_err(|e| RunError::Input {
                    source_name: "stdin".to_string(),
                    source: e,
                })?;
            Ok(body)
        }
    }
}

async fn read_body_file(path: PathBuf) -> Result<Vec<u8>, RunError> {
    tokio::fs::read(&path).await.map_err(|e| RunError::Input {
        source_name: path.display().to_string(),
        source: e,
    })
}
