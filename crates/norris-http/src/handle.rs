//! Cancellable in-flight requests and the [`Transport`] seam.

use std::future::Future;

use norris_core::error::NetworkError;
use tokio::task::JoinHandle;

use crate::{client::HttpClient, endpoint::{Endpoint, HttpResponse}};

pub type Outcome = Result<HttpResponse, NetworkError>;

/// A request running on its own task.
///
/// Cancelling (or dropping) the handle aborts the request. Cancelling a
/// request that already finished changes nothing.
pub struct RequestHandle {
  task: JoinHandle<Outcome>,
}

impl RequestHandle {
  pub fn spawn<F>(request: F) -> Self
  where
    F: Future<Output = Outcome> + Send + 'static,
  {
    Self { task: tokio::spawn(request) }
  }

  /// A handle whose outcome is already known.
  pub fn ready(outcome: Outcome) -> Self { Self::spawn(async move { outcome }) }

  pub fn cancel(&self) { self.task.abort(); }

  pub fn is_finished(&self) -> bool { self.task.is_finished() }

  /// Wait for the terminal outcome. `None` means the request was cancelled
  /// before it completed.
  pub async fn outcome(mut self) -> Option<Outcome> {
    match (&mut self.task).await {
      Ok(outcome) => Some(outcome),
      Err(e) if e.is_cancelled() => None,
      Err(e) => Some(Err(NetworkError::unknown(e))),
    }
  }
}

impl Drop for RequestHandle {
  fn drop(&mut self) { self.task.abort(); }
}

/// Anything that can carry a request to the facts API.
pub trait Transport: Send + Sync {
  fn send<E: Endpoint + 'static>(&self, endpoint: E) -> RequestHandle;
}

impl Transport for HttpClient {
  fn send<E: Endpoint + 'static>(&self, endpoint: E) -> RequestHandle {
    let client = self.clone();
    RequestHandle::spawn(async move { client.execute(&endpoint).await })
  }
}
