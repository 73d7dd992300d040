//! Fact types — the fundamental unit of the NorrisFacts store.
//!
//! A fact is identified by the id assigned by the remote source. Re-fetching
//! a fact with a known id updates the stored copy in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::FactCategory;

/// Label shown for facts the remote source left uncategorised.
pub const UNCATEGORIZED: &str = "UNCATEGORIZED";

/// Facts longer than this many characters are rendered in a compact style.
pub const LONG_TEXT_THRESHOLD: usize = 80;

/// A single fact with its categorisation and source metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NorrisFact {
  /// Stable identity from the remote source; the primary key.
  pub id:         String,
  pub text:       String,
  pub icon_url:   String,
  /// Canonical link to the fact on the source site.
  pub url:        String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub categories: Vec<FactCategory>,
}

impl NorrisFact {
  /// The first category title upper-cased, or [`UNCATEGORIZED`].
  pub fn category_label(&self) -> String {
    self
      .categories
      .first()
      .map(|c| c.title.to_uppercase())
      .unwrap_or_else(|| UNCATEGORIZED.to_owned())
  }

  pub fn is_long(&self) -> bool { self.text.chars().count() > LONG_TEXT_THRESHOLD }
}

/// Facts are equal when their ids are; payload differences are an update of
/// the same fact.
impl PartialEq for NorrisFact {
  fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for NorrisFact {}

#[cfg(test)]
mod tests {
  use super::*;

  fn fact(id: &str, text: &str, categories: &[&str]) -> NorrisFact {
    NorrisFact {
      id:         id.into(),
      text:       text.into(),
      icon_url:   "https://assets.chucknorris.host/img/avatar/chuck-norris.png".into(),
      url:        format!("https://api.chucknorris.io/jokes/{id}"),
      created_at: Utc::now(),
      updated_at: Utc::now(),
      categories: categories.iter().map(|c| FactCategory::new(*c)).collect(),
    }
  }

  #[test]
  fn category_label_uses_first_category() {
    let f = fact("a1", "short", &["sport", "dev"]);
    assert_eq!(f.category_label(), "SPORT");
  }

  #[test]
  fn category_label_falls_back_to_uncategorized() {
    let f = fact("a1", "short", &[]);
    assert_eq!(f.category_label(), UNCATEGORIZED);
  }

  #[test]
  fn equality_is_by_id() {
    let a = fact("same", "one text", &["sport"]);
    let b = fact("same", "another text", &[]);
    let c = fact("other", "one text", &["sport"]);
    assert_eq!(a, b);
    assert_ne!(a, c);
  }

  #[test]
  fn long_text_threshold() {
    assert!(!fact("a", &"x".repeat(80), &[]).is_long());
    assert!(fact("b", &"x".repeat(81), &[]).is_long());
  }
}
