//! How an operation failure is presented to the user.
//!
//! | Cause | Message | Icon | Retry |
//! |-------|---------|------|-------|
//! | `NoInternetConnection` | offline | `wifi_error` | never |
//! | anything else | generic | `warning` | only for category sync |
//!
//! The notice replaces the whole list when the list is empty, and is shown
//! as a transient toast otherwise.

use strum::{AsRefStr, Display};

use crate::error::{ErrorCode, FactsError};

pub const OFFLINE_MESSAGE: &str =
  "You are offline. Facts will load once the connection is back.";

pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum NoticeIcon {
  WifiError,
  Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStyle {
  /// Replaces the list; there is nothing else to show.
  FullScreen,
  /// Shown over a list that still has content.
  Toast,
}

/// A user-facing description of a [`FactsError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
  pub code:          u16,
  pub message:       &'static str,
  pub icon:          NoticeIcon,
  pub retry_enabled: bool,
  pub style:         NoticeStyle,
}

impl ErrorNotice {
  pub fn for_error(error: &FactsError, list_is_empty: bool) -> Self {
    let style = if list_is_empty { NoticeStyle::FullScreen } else { NoticeStyle::Toast };

    if error.cause().is_offline() {
      return Self {
        code: error.code(),
        message: OFFLINE_MESSAGE,
        icon: NoticeIcon::WifiError,
        retry_enabled: false,
        style,
      };
    }

    Self {
      code: error.code(),
      message: GENERIC_MESSAGE,
      icon: NoticeIcon::Warning,
      retry_enabled: matches!(error, FactsError::SyncCategoriesFailed(_)),
      style,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::NetworkError;

  #[test]
  fn offline_disables_retry() {
    let err = FactsError::SyncCategoriesFailed(NetworkError::NoInternetConnection);
    let notice = ErrorNotice::for_error(&err, true);
    assert_eq!(notice.message, OFFLINE_MESSAGE);
    assert_eq!(notice.icon, NoticeIcon::WifiError);
    assert!(!notice.retry_enabled);
    assert_eq!(notice.style, NoticeStyle::FullScreen);
  }

  #[test]
  fn sync_failure_offers_retry() {
    let err = FactsError::SyncCategoriesFailed(NetworkError::ConnectionError);
    let notice = ErrorNotice::for_error(&err, true);
    assert_eq!(notice.message, GENERIC_MESSAGE);
    assert_eq!(notice.icon, NoticeIcon::Warning);
    assert!(notice.retry_enabled);
    assert_eq!(notice.code, 100);
  }

  #[test]
  fn load_failure_over_content_is_a_toast_without_retry() {
    let err = FactsError::LoadFactsFailed(NetworkError::StatusCode(500));
    let notice = ErrorNotice::for_error(&err, false);
    assert_eq!(notice.style, NoticeStyle::Toast);
    assert!(!notice.retry_enabled);
    assert_eq!(notice.icon.as_ref(), "warning");
  }
}
