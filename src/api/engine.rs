//! Request engine: one logical API call with timeout, retries and backoff.

use serde_json::{Map, Value};

use crate::time::{Sleeper, TokioSleeper};

use super::envelope::unwrap_envelope;
use super::{ApiError, AttemptError, HttpClient, HttpError, HttpRequest, HttpResponse, RetryPolicy};

/// Maximum number of body bytes included in diagnostics and errors.
pub const BODY_PREVIEW_LIMIT: usize = 500;

/// Outcome of a single attempt.
#[derive(Debug)]
enum Attempt {
    /// 2xx with a JSON object body.
    Success(Map<String, Value>),
    /// Worth retrying.
    Transient(AttemptError),
    /// Stop immediately.
    Terminal(ApiError),
}

/// Executes API calls over an injected transport.
///
/// Each call is independent: the engine keeps no state between calls, so a
/// single engine can serve concurrent callers.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used for backoff (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```
/// use lakipay::api::{ReqwestClient, RequestEngine, RetryPolicy};
///
/// let engine = RequestEngine::new(ReqwestClient::new(), RetryPolicy::default())
///     .with_request_logging(true);
/// assert_eq!(engine.policy().max_retries, 2);
/// ```
#[derive(Debug)]
pub struct RequestEngine<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    policy: RetryPolicy,
    log_requests: bool,
}

impl<H> RequestEngine<H, TokioSleeper> {
    /// Creates an engine that sleeps on the Tokio timer between retries.
    #[must_use]
    pub const fn new(client: H, policy: RetryPolicy) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            policy,
            log_requests: false,
        }
    }
}

impl<H, S> RequestEngine<H, S> {
    /// Replaces the backoff sleeper.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RequestEngine<H, S2> {
        RequestEngine {
            client: self.client,
            sleeper,
            policy: self.policy,
            log_requests: self.log_requests,
        }
    }

    /// Enables or disables per-attempt request/response logging.
    #[must_use]
    pub const fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Returns true if request logging is enabled.
    #[must_use]
    pub const fn logs_requests(&self) -> bool {
        self.log_requests
    }
}

impl<H: HttpClient, S: Sleeper> RequestEngine<H, S> {
    /// Sends `request` until it yields a JSON object or the retry budget runs out.
    ///
    /// Transport failures, non-2xx statuses and malformed bodies are all
    /// retried, sleeping `base_backoff * 2^attempt` in between.
    ///
    /// # Errors
    ///
    /// - [`ApiError::RetriesExhausted`] carrying the last attempt's failure
    /// - [`ApiError::InvalidRequest`] if the transport rejects the request outright
    pub async fn execute(&self, request: HttpRequest) -> Result<Map<String, Value>, ApiError> {
        let mut attempt: u32 = 0;

        loop {
            let error = match self.attempt(&request).await {
                Attempt::Success(body) => return Ok(body),
                Attempt::Terminal(error) => return Err(error),
                Attempt::Transient(error) => error,
            };

            if !self.policy.should_retry(attempt) {
                tracing::error!(
                    "{} {} failed after {} attempt(s): {error}",
                    request.method,
                    request.url,
                    attempt + 1
                );
                return Err(ApiError::RetriesExhausted {
                    attempts: attempt + 1,
                    last: error,
                });
            }

            let delay = self.policy.delay_for_retry(attempt);
            tracing::warn!(
                "{} {} attempt {} failed ({error}), retrying in {}ms",
                request.method,
                request.url,
                attempt + 1,
                delay.as_millis()
            );
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }

    /// Executes `request` and unwraps the response envelope.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus
    /// [`ApiError::Logical`] when the API answers `status: "ERROR"`.
    /// Logical errors are never retried.
    pub async fn call(&self, request: HttpRequest) -> Result<Value, ApiError> {
        unwrap_envelope(self.execute(request).await?)
    }

    async fn attempt(&self, request: &HttpRequest) -> Attempt {
        if self.log_requests {
            tracing::info!(
                "-> {} {} body={}",
                request.method,
                request.url,
                request.body_text().unwrap_or("null")
            );
        }

        let sent = tokio::time::timeout(self.policy.timeout, self.client.request(request.clone()));
        let response = match sent.await {
            Ok(Ok(response)) => response,
            Ok(Err(error)) if error.is_transient() => return Attempt::Transient(error.into()),
            Ok(Err(error)) => return Attempt::Terminal(ApiError::InvalidRequest(error)),
            Err(_elapsed) => return Attempt::Transient(HttpError::Timeout.into()),
        };

        if self.log_requests {
            tracing::info!(
                "<- {} body={}",
                response.status.as_u16(),
                preview(&String::from_utf8_lossy(&response.body), BODY_PREVIEW_LIMIT)
            );
        }

        classify(&response)
    }
}

fn classify(response: &HttpResponse) -> Attempt {
    let status = response.status;

    if !response.is_success() {
        return Attempt::Transient(AttemptError::HttpStatus {
            status,
            body: response
                .body_text()
                .map(|text| preview(text, BODY_PREVIEW_LIMIT).to_string()),
        });
    }

    match serde_json::from_slice::<Value>(&response.body) {
        Ok(Value::Object(body)) => Attempt::Success(body),
        Ok(other) => Attempt::Transient(AttemptError::MalformedBody {
            status,
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
        Err(e) => Attempt::Transient(AttemptError::MalformedBody {
            status,
            reason: e.to_string(),
        }),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Truncates `text` to at most `limit` bytes on a character boundary.
#[must_use]
pub fn preview(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
