//! Entry point tying configuration, transport and endpoints together.

use crate::api::{ReqwestClient, RequestEngine};
use crate::config::{ClientConfig, ConfigError};
use crate::payments::PaymentsClient;
use crate::time::TokioSleeper;
use crate::webhook::{WebhookError, WebhookVerifier};

/// Lakipay API client.
///
/// Owns one transport and one request engine for its whole lifetime;
/// share it through `&Lakipay` or an `Arc`.
///
/// # Example
///
/// ```no_run
/// use lakipay::{ClientConfig, Lakipay};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sdk = Lakipay::new(ClientConfig::new("sk_test_123"))?;
/// let transaction = sdk.payments().get_transaction("tx_1").await?;
/// println!("{transaction}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Lakipay<H = ReqwestClient, S = TokioSleeper> {
    config: ClientConfig,
    payments: PaymentsClient<H, S>,
}

impl Lakipay {
    /// Creates a client over a fresh reqwest connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is unusable.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Self::with_client(config, ReqwestClient::new())
    }
}

impl<H> Lakipay<H> {
    /// Creates a client over the given transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - The timeout is zero
    /// - The base URL cannot carry endpoint paths
    /// - The API key is not a valid header value
    pub fn with_client(config: ClientConfig, client: H) -> Result<Self, ConfigError> {
        if config.timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        let base_url = config.resolved_base_url()?;
        let headers = config.default_headers()?;
        let engine = RequestEngine::new(client, config.retry_policy())
            .with_request_logging(config.log_requests);

        tracing::debug!(
            "Lakipay client ready: environment={}, base_url={}",
            config.environment,
            base_url
        );

        Ok(Self {
            config,
            payments: PaymentsClient::new(engine, base_url, headers),
        })
    }
}

impl<H, S> Lakipay<H, S> {
    /// Replaces the backoff sleeper.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Lakipay<H, S2> {
        Lakipay {
            config: self.config,
            payments: self.payments.with_sleeper(sleeper),
        }
    }

    /// Returns the payment endpoints.
    #[must_use]
    pub const fn payments(&self) -> &PaymentsClient<H, S> {
        &self.payments
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds a webhook verifier trusting the given PEM public key.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::InvalidKey`] if the PEM is not an RSA or EC P-256 public key.
    #[allow(clippy::unused_self)] // Verification needs no API settings
    pub fn webhook_verifier(&self, public_key_pem: &str) -> Result<WebhookVerifier, WebhookError> {
        WebhookVerifier::from_pem(public_key_pem)
    }
}
