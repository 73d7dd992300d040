//! [`MockTransport`] — a scripted [`Transport`] for tests and demos.

use std::{
  collections::VecDeque,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use bytes::Bytes;
use norris_core::error::NetworkError;

use crate::{
  endpoint::{Endpoint, HttpMethod, HttpResponse},
  handle::{Outcome, RequestHandle, Transport},
};

/// What the mock saw for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
  pub method: HttpMethod,
  pub path:   String,
  pub query:  Vec<(String, String)>,
}

#[derive(Default)]
struct MockState {
  queue:    VecDeque<Outcome>,
  fallback: Option<Outcome>,
  requests: Vec<RecordedRequest>,
}

/// Answers requests from a queue of outcomes, then from a fallback.
///
/// Without a fallback an exhausted queue answers `Unknown`. Clones share
/// the same script and request log.
#[derive(Clone, Default)]
pub struct MockTransport {
  state: Arc<Mutex<MockState>>,
}

impl MockTransport {
  pub fn new() -> Self { Self::default() }

  pub fn respond(&self, status_code: u16, body: impl Into<Bytes>) -> &Self {
    self.state().queue.push_back(Ok(HttpResponse::new(status_code, body)));
    self
  }

  pub fn fail(&self, error: NetworkError) -> &Self {
    self.state().queue.push_back(Err(error));
    self
  }

  /// Outcome served once the queue is empty.
  pub fn set_fallback(&self, outcome: Outcome) { self.state().fallback = Some(outcome); }

  pub fn requests(&self) -> Vec<RecordedRequest> { self.state().requests.clone() }

  pub fn request_count(&self) -> usize { self.state().requests.len() }

  fn state(&self) -> MutexGuard<'_, MockState> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl Transport for MockTransport {
  fn send<E: Endpoint + 'static>(&self, endpoint: E) -> RequestHandle {
    let outcome = {
      let mut state = self.state();
      state.requests.push(RecordedRequest {
        method: endpoint.method(),
        path:   endpoint.path(),
        query:  endpoint
          .query()
          .into_iter()
          .map(|(k, v)| (k.to_owned(), v))
          .collect(),
      });
      let next = state.queue.pop_front();
      next
        .or_else(|| state.fallback.clone())
        .unwrap_or(Err(NetworkError::Unknown(None)))
    };
    RequestHandle::ready(outcome)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::FactsApi;

  #[tokio::test]
  async fn serves_queue_then_fallback() {
    let mock = MockTransport::new();
    mock.respond(200, "[]").fail(NetworkError::ConnectionError);
    mock.set_fallback(Ok(HttpResponse::new(500, "")));

    let api = FactsApi::default();
    let first = mock.send(api.categories()).outcome().await.unwrap().unwrap();
    assert_eq!(first.status_code, 200);

    let second = mock.send(api.categories()).outcome().await.unwrap();
    assert_eq!(second.unwrap_err(), NetworkError::ConnectionError);

    let third = mock.send(api.categories()).outcome().await.unwrap().unwrap();
    assert_eq!(third.status_code, 500);
  }

  #[tokio::test]
  async fn exhausted_queue_without_fallback_is_unknown() {
    let mock = MockTransport::new();
    let outcome = mock.send(FactsApi::default().categories()).outcome().await.unwrap();
    assert_eq!(outcome.unwrap_err(), NetworkError::Unknown(None));
  }

  #[tokio::test]
  async fn records_requests() {
    let mock = MockTransport::new();
    let _ = mock.send(FactsApi::default().search("sport")).outcome().await;

    assert_eq!(mock.request_count(), 1);
    assert_eq!(mock.requests()[0], RecordedRequest {
      method: HttpMethod::Get,
      path:   "/search".into(),
      query:  vec![("query".into(), "sport".into())],
    });
  }
}
