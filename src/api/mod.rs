//! Request layer for the Lakipay HTTP API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Resilient call execution ([`RequestEngine`])
//! - Retry policy configuration ([`RetryPolicy`])
//! - Response envelope decoding ([`ApiEnvelope`])

mod client;
mod engine;
mod envelope;
mod error;
mod http;
mod retry;

#[cfg(test)]
mod envelope_tests;
#[cfg(test)]
mod retry_tests;

pub use client::ReqwestClient;
pub use engine::{BODY_PREVIEW_LIMIT, RequestEngine, preview};
pub use envelope::{ApiEnvelope, DEFAULT_ERROR_MESSAGE, unwrap_envelope};
pub use error::{ApiError, AttemptError, HttpError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::RetryPolicy;
