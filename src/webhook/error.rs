//! Error types for webhook handling.

use thiserror::Error;

/// Error type for inbound webhook notifications.
///
/// `Parse` and `Authentication` are deliberately distinct so callers can
/// tell a malformed body from an untrusted sender.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The body is not a JSON object.
    #[error("Invalid JSON body for webhook: {0}")]
    Parse(String),

    /// The signature is missing, malformed or does not match.
    #[error("Invalid Lakipay webhook signature")]
    Authentication,

    /// The configured public key could not be loaded.
    #[error("Invalid webhook public key: {0}")]
    InvalidKey(String),
}

impl WebhookError {
    /// Returns true if the sender could not be authenticated.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }
}
