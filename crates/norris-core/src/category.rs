//! Fact categories — the tag groups a fact may belong to.

use serde::{Deserialize, Serialize};

/// A named category. The title is the primary key.
///
/// Serialises as a bare string, which is also how the remote API lists
/// categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactCategory {
  pub title: String,
}

impl FactCategory {
  pub fn new(title: impl Into<String>) -> Self { Self { title: title.into() } }
}

impl From<&str> for FactCategory {
  fn from(title: &str) -> Self { Self::new(title) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_from_bare_string() {
    let categories: Vec<FactCategory> =
      serde_json::from_str(r#"["dev", "sport"]"#).unwrap();
    assert_eq!(categories, vec![FactCategory::new("dev"), FactCategory::new("sport")]);
  }
}
