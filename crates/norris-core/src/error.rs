//! Error taxonomy for the NorrisFacts pipeline.
//!
//! [`NetworkError`] is the closed set of transport/classification failures.
//! [`FactsError`] wraps one of them with the operation that failed. Both carry
//! a stable numeric code used for policy decisions (retry, offline display)
//! and a human-readable message.

use std::sync::Arc;

use thiserror::Error;

/// An underlying failure kept for diagnostics only.
pub type Cause = Arc<dyn std::error::Error + Send + Sync>;

/// A stable code plus a display message.
pub trait ErrorCode {
  fn code(&self) -> u16;
  fn message(&self) -> String;
}

// ─── NetworkError ────────────────────────────────────────────────────────────

/// Transport and decoding failures.
///
/// Two values are equal iff their codes match: the wrapped cause and the
/// status code value are for display, not identity.
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
  #[error("{}", describe(.0, "Unknown"))]
  Unknown(#[source] Option<Cause>),

  #[error("{}", describe(.0, "Parser error"))]
  JsonMapping(#[source] Option<Cause>),

  #[error("Connection Error")]
  ConnectionError,

  #[error("No internet connection")]
  NoInternetConnection,

  #[error("Unexpected status code {0}")]
  StatusCode(u16),
}

fn describe(cause: &Option<Cause>, fallback: &str) -> String {
  cause
    .as_ref()
    .map(|c| c.to_string())
    .unwrap_or_else(|| fallback.to_owned())
}

impl NetworkError {
  pub fn unknown(cause: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Unknown(Some(Arc::new(cause)))
  }

  pub fn json_mapping(cause: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::JsonMapping(Some(Arc::new(cause)))
  }

  /// Classify an HTTP status. Codes in `[400, 600)` are errors.
  pub fn from_status(status_code: u16) -> Option<Self> {
    (400..600)
      .contains(&status_code)
      .then_some(Self::StatusCode(status_code))
  }

  /// Only status-code failures and the legacy connection error are worth a
  /// retry; everything else fails immediately.
  pub fn is_retryable(&self) -> bool {
    matches!(self, Self::StatusCode(_) | Self::ConnectionError)
  }

  pub fn is_offline(&self) -> bool { matches!(self, Self::NoInternetConnection) }
}

impl ErrorCode for NetworkError {
  fn code(&self) -> u16 {
    match self {
      Self::Unknown(_) => 0,
      Self::JsonMapping(_) => 1,
      Self::ConnectionError => 2,
      Self::NoInternetConnection => 3,
      Self::StatusCode(_) => 4,
    }
  }

  fn message(&self) -> String { self.to_string() }
}

impl PartialEq for NetworkError {
  fn eq(&self, other: &Self) -> bool { self.code() == other.code() }
}

impl Eq for NetworkError {}

// ─── FactsError ──────────────────────────────────────────────────────────────

/// Failure of a user-facing operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactsError {
  #[error("could not sync fact categories: {0}")]
  SyncCategoriesFailed(#[source] NetworkError),

  #[error("could not load facts: {0}")]
  LoadFactsFailed(#[source] NetworkError),
}

impl FactsError {
  pub fn cause(&self) -> &NetworkError {
    match self {
      Self::SyncCategoriesFailed(e) | Self::LoadFactsFailed(e) => e,
    }
  }
}

impl ErrorCode for FactsError {
  fn code(&self) -> u16 {
    match self {
      Self::SyncCategoriesFailed(_) => 100,
      Self::LoadFactsFailed(_) => 101,
    }
  }

  fn message(&self) -> String { self.cause().message() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Error)]
  #[error("socket closed")]
  struct SocketClosed;

  #[test]
  fn codes_are_stable() {
    assert_eq!(NetworkError::Unknown(None).code(), 0);
    assert_eq!(NetworkError::JsonMapping(None).code(), 1);
    assert_eq!(NetworkError::ConnectionError.code(), 2);
    assert_eq!(NetworkError::NoInternetConnection.code(), 3);
    assert_eq!(NetworkError::StatusCode(503).code(), 4);
  }

  #[test]
  fn equality_ignores_status_value_and_cause() {
    assert_eq!(NetworkError::StatusCode(500), NetworkError::StatusCode(404));
    assert_eq!(NetworkError::unknown(SocketClosed), NetworkError::Unknown(None));
    assert_ne!(NetworkError::ConnectionError, NetworkError::NoInternetConnection);
  }

  #[test]
  fn status_classification() {
    assert_eq!(NetworkError::from_status(200), None);
    assert_eq!(NetworkError::from_status(399), None);
    assert!(matches!(NetworkError::from_status(400), Some(NetworkError::StatusCode(400))));
    assert!(matches!(NetworkError::from_status(599), Some(NetworkError::StatusCode(599))));
    assert_eq!(NetworkError::from_status(600), None);
  }

  #[test]
  fn only_status_and_connection_errors_retry() {
    assert!(NetworkError::StatusCode(500).is_retryable());
    assert!(NetworkError::ConnectionError.is_retryable());
    assert!(!NetworkError::NoInternetConnection.is_retryable());
    assert!(!NetworkError::JsonMapping(None).is_retryable());
    assert!(!NetworkError::Unknown(None).is_retryable());
  }

  #[test]
  fn messages_prefer_the_cause() {
    assert_eq!(NetworkError::unknown(SocketClosed).message(), "socket closed");
    assert_eq!(NetworkError::Unknown(None).message(), "Unknown");
    assert_eq!(NetworkError::JsonMapping(None).message(), "Parser error");
    assert_eq!(NetworkError::NoInternetConnection.message(), "No internet connection");
  }

  #[test]
  fn operation_errors_wrap_their_cause() {
    let err = FactsError::LoadFactsFailed(NetworkError::StatusCode(500));
    assert_eq!(err.code(), 101);
    assert_eq!(err.cause(), &NetworkError::StatusCode(500));
    assert_eq!(FactsError::SyncCategoriesFailed(NetworkError::ConnectionError).code(), 100);
    assert!(std::error::Error::source(&err).is_some());
  }
}
