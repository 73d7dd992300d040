//! Bounded retry with a fixed back-off.

use std::{future::Future, time::Duration};

use norris_core::error::NetworkError;

/// How many times a failed request is re-attempted, and how long to wait
/// between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  pub max_retries: u32,
  pub delay:       Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self { Self { max_retries: 2, delay: Duration::from_secs(4) } }
}

impl RetryPolicy {
  /// Fail on the first error.
  pub fn none() -> Self { Self { max_retries: 0, delay: Duration::ZERO } }

  /// `retries` is the number of re-attempts already made.
  pub fn should_retry(&self, error: &NetworkError, retries: u32) -> bool {
    error.is_retryable() && retries < self.max_retries
  }

  /// Run `attempt` until it succeeds, fails with a non-retryable error, or
  /// the retry budget is spent. Waits [`RetryPolicy::delay`] between
  /// attempts; dropping the returned future during the wait cancels the
  /// pending retry.
  pub async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<T, NetworkError>
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, NetworkError>>,
  {
    let mut retries = 0;
    loop {
      match attempt().await {
        Ok(value) => return Ok(value),
        Err(e) if self.should_retry(&e, retries) => {
          retries += 1;
          tracing::warn!(
            error = %e,
            retry = retries,
            max_retries = self.max_retries,
            delay_secs = self.delay.as_secs_f64(),
            "request failed; retrying"
          );
          tokio::time::sleep(self.delay).await;
        }
        Err(e) => return Err(e),
      }
    }
  }
}
