//! Lakipay: client library for the Lakipay payment API
//!
//! Sends authenticated payment requests with timeouts and exponential
//! backoff retries, unwraps the API's response envelope, and verifies
//! signed webhook notifications.

pub mod api;
pub mod config;
pub mod payments;
mod sdk;
pub mod time;
pub mod webhook;

pub use api::ApiError;
pub use config::{ClientConfig, Environment};
pub use sdk::Lakipay;
pub use webhook::{WebhookError, WebhookVerifier};
