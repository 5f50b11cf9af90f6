//! Payment endpoints of the Lakipay API.
//!
//! Thin data shaping over [`RequestEngine`](crate::api::RequestEngine):
//! - Direct payments ([`DirectPaymentRequest`])
//! - Withdrawals ([`WithdrawalRequest`])
//! - Hosted checkout ([`HostedCheckoutRequest`])
//! - Transaction lookup ([`PaymentsClient::get_transaction`])

mod client;
mod request;


pub use client::PaymentsClient;
pub use request::{DirectPaymentRequest, HostedCheckoutRequest, Redirects, WithdrawalRequest};
