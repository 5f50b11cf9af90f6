//! Sleep abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait that allows injecting instant or
//! recording sleepers in tests while using the Tokio timer in production.

use std::time::Duration;

/// Abstraction over asynchronous sleeping.
///
/// The request engine waits between retry attempts through this trait, so
/// tests can observe backoff delays without actually waiting.
///
/// # Example
///
/// ```
/// use lakipay::time::{InstantSleeper, Sleeper};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// InstantSleeper.sleep(Duration::from_secs(60)).await; // returns immediately
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for `duration`.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Useful in tests and for callers that want retries without backoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
