//! Verification of inbound Lakipay webhook notifications.
//!
//! This module provides:
//! - Canonical string construction ([`canonical_string`])
//! - Trusted key loading ([`PublicKey`])
//! - Signature verification and body parsing ([`WebhookVerifier`])
//!
//! It is independent of the request layer in [`crate::api`].

mod canonical;
mod error;
mod verifier;

#[cfg(test)]
mod test_fixtures;

pub use canonical::{NESTED_VALUE, SIGNATURE_FIELD, canonical_string, render_value};
pub use error::WebhookError;
pub use verifier::{PublicKey, WebhookPayload, WebhookVerifier};
