//! Error types for API calls.

use serde_json::Value;
use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong before any HTTP status was obtained,
/// without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Failure of a single attempt that the request engine retries.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// No HTTP status was obtained.
    #[error("Request to Lakipay API failed: {0}")]
    Transport(#[from] HttpError),

    /// The server answered outside the 2xx range.
    #[error("HTTP error from Lakipay API: {}", status.as_u16())]
    HttpStatus {
        /// Response status code
        status: http::StatusCode,
        /// Truncated response body, if it was valid UTF-8
        body: Option<String>,
    },

    /// The server answered 2xx but the body is not a JSON object.
    #[error("Failed to parse JSON response from Lakipay API: {reason}")]
    MalformedBody {
        /// Response status code
        status: http::StatusCode,
        /// What was wrong with the body
        reason: String,
    },
}

impl AttemptError {
    /// Returns the HTTP status of the attempt, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Transport(_) => None,
            Self::HttpStatus { status, .. } | Self::MalformedBody { status, .. } => Some(*status),
        }
    }
}

/// Terminal error surfaced to callers of the API.
///
/// Distinguishes transport failure, HTTP failure and business-rule failure:
/// the first two arrive wrapped in [`ApiError::RetriesExhausted`] after the
/// retry budget is spent, the last one as [`ApiError::Logical`] without any
/// retry.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Every attempt failed; carries the last attempt's cause.
    #[error("{last} (after {attempts} attempt(s))")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Failure of the final attempt
        #[source]
        last: AttemptError,
    },

    /// The API rejected the request with `status: "ERROR"`.
    #[error("{message}")]
    Logical {
        /// Message reported by the API
        message: String,
        /// Machine-readable `error_code`, when the API sent a string
        code: Option<String>,
        /// Structured `errors` value (empty array when absent)
        details: Value,
    },

    /// The request could not be sent at all; not worth retrying.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[source] HttpError),

    /// The request body could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status associated with the failure.
    ///
    /// Logical errors report 200, since the API signals business errors
    /// inside a successful response.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::RetriesExhausted { last, .. } => last.status().map(|s| s.as_u16()),
            Self::Logical { .. } => Some(200),
            Self::InvalidRequest(_) | Self::Encode(_) => None,
        }
    }

    /// The API's `error_code`, for logical errors.
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Logical { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The API's structured `errors`, for logical errors.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        match self {
            Self::Logical { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Returns true for business-rule rejections reported by the API.
    #[must_use]
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::Logical { .. })
    }

    /// Returns true if no HTTP status was ever obtained.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::RetriesExhausted {
                last: AttemptError::Transport(_),
                ..
            }
        )
    }
}

impl HttpError {
    /// Returns true if the failure may clear up on a later attempt.
    ///
    /// Network errors and timeouts are transient; an unusable URL is a
    /// configuration problem and fails the call immediately.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            Self::InvalidUrl(_) => false,
        }
    }
}
