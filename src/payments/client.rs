//! Payment endpoint callers.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::api::{ApiError, HttpClient, HttpError, HttpRequest, RequestEngine};
use crate::time::{Sleeper, TokioSleeper};

use super::{DirectPaymentRequest, HostedCheckoutRequest, WithdrawalRequest};

const PAYMENT_PATH: [&str; 3] = ["api", "v2", "payment"];

/// Calls the Lakipay payment endpoints.
///
/// Each method builds the endpoint URL and JSON body, attaches the
/// authentication headers, and returns the envelope's `data` payload.
#[derive(Debug)]
pub struct PaymentsClient<H, S = TokioSleeper> {
    engine: RequestEngine<H, S>,
    base_url: Url,
    headers: http::HeaderMap,
}

impl<H, S> PaymentsClient<H, S> {
    /// Creates a client sending `headers` on every call to `base_url`.
    #[must_use]
    pub const fn new(engine: RequestEngine<H, S>, base_url: Url, headers: http::HeaderMap) -> Self {
        Self {
            engine,
            base_url,
            headers,
        }
    }

    /// Replaces the engine's backoff sleeper.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> PaymentsClient<H, S2> {
        PaymentsClient {
            engine: self.engine.with_sleeper(sleeper),
            base_url: self.base_url,
            headers: self.headers,
        }
    }

    /// Returns the underlying request engine.
    #[must_use]
    pub const fn engine(&self) -> &RequestEngine<H, S> {
        &self.engine
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base_url}/api/v2/payment/{segments...}`, percent-encoding
    /// each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::InvalidRequest(HttpError::InvalidUrl(format!(
                    "{} cannot be used as a base URL",
                    self.base_url
                )))
            })?
            .pop_if_empty()
            .extend(PAYMENT_PATH)
            .extend(segments);
        Ok(url)
    }
}

impl<H: HttpClient, S: Sleeper> PaymentsClient<H, S> {
    /// Charges the payer directly on the given medium.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the API rejects it.
    pub async fn create_direct_payment(
        &self,
        request: &DirectPaymentRequest,
    ) -> Result<Value, ApiError> {
        self.post(&["direct"], request).await
    }

    /// Pays out to the recipient's account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the API rejects it.
    pub async fn create_withdrawal(&self, request: &WithdrawalRequest) -> Result<Value, ApiError> {
        self.post(&["withdrawal"], request).await
    }

    /// Creates a hosted checkout page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the API rejects it.
    pub async fn create_hosted_checkout(
        &self,
        request: &HostedCheckoutRequest,
    ) -> Result<Value, ApiError> {
        self.post(&["checkout"], request).await
    }

    /// Fetches a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] without calling the API if the id
    /// is empty, `.` or `..`, and [`ApiError`] if the call fails or the API
    /// rejects it.
    pub async fn get_transaction(&self, transaction_id: &str) -> Result<Value, ApiError> {
        // Dot segments would be resolved away instead of percent-encoded.
        if matches!(transaction_id, "" | "." | "..") {
            return Err(ApiError::InvalidRequest(HttpError::InvalidUrl(format!(
                "transaction id '{transaction_id}' is not a usable path segment"
            ))));
        }
        let url = self.endpoint(&["transaction", transaction_id])?;
        let request = HttpRequest::get(url).with_headers(&self.headers);
        self.engine.call(request).await
    }

    async fn post<T: Serialize + Sync>(&self, path: &[&str], body: &T) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        let request = HttpRequest::post(url)
            .with_headers(&self.headers)
            .with_json(body)?;
        self.engine.call(request).await
    }
}
