//! Decoding of the API's response envelope.
//!
//! Every Lakipay response is a JSON object of the shape
//! `{"status": "OK" | "ERROR", "message", "error_code", "errors", "data"}`.
//! Business-rule failures arrive with HTTP 200 and `status: "ERROR"`.

use serde_json::{Map, Value};

use super::ApiError;

/// Message used when the API reports an error without one.
pub const DEFAULT_ERROR_MESSAGE: &str = "Lakipay API returned logical error";

/// A decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEnvelope {
    /// Anything whose `status` is not the literal string `"ERROR"`.
    Success {
        /// The `data` payload; an empty object when absent or scalar
        data: Value,
    },
    /// `status == "ERROR"`.
    Failure {
        /// `message`, or [`DEFAULT_ERROR_MESSAGE`] when empty or missing
        message: String,
        /// `error_code` when it is a string
        code: Option<String>,
        /// `errors` when it is an array or object, otherwise an empty array
        details: Value,
    },
}

impl ApiEnvelope {
    /// Decodes an envelope from a response object.
    #[must_use]
    pub fn decode(mut body: Map<String, Value>) -> Self {
        if body.get("status").and_then(Value::as_str) != Some("ERROR") {
            let data = match body.remove("data") {
                Some(data @ (Value::Object(_) | Value::Array(_))) => data,
                _ => Value::Object(Map::new()),
            };
            return Self::Success { data };
        }

        let message = match body.remove("message") {
            Some(Value::String(message)) if !message.is_empty() => message,
            _ => DEFAULT_ERROR_MESSAGE.to_string(),
        };
        let code = match body.remove("error_code") {
            Some(Value::String(code)) => Some(code),
            _ => None,
        };
        let details = match body.remove("errors") {
            Some(details @ (Value::Object(_) | Value::Array(_))) => details,
            _ => Value::Array(Vec::new()),
        };

        Self::Failure {
            message,
            code,
            details,
        }
    }

    /// Converts the envelope into the call's outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Logical`] for [`ApiEnvelope::Failure`].
    pub fn into_result(self) -> Result<Value, ApiError> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure {
                message,
                code,
                details,
            } => Err(ApiError::Logical {
                message,
                code,
                details,
            }),
        }
    }
}

/// Decodes `body` and returns its `data` payload.
///
/// # Errors
///
/// Returns [`ApiError::Logical`] when the envelope reports `status: "ERROR"`.
pub fn unwrap_envelope(body: Map<String, Value>) -> Result<Value, ApiError> {
    ApiEnvelope::decode(body).into_result()
}
