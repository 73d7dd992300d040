//! Search records — a term the user searched and the facts it returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fact::NorrisFact;

/// One record per distinct term. Searching the same term again refreshes
/// `updated_at` and replaces `facts` with the latest result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Search {
  /// Primary key, kept exactly as typed.
  pub term:       String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  /// Facts returned for `term`, in result order.
  pub facts:      Vec<NorrisFact>,
}

/// Whether `term` would trigger a remote search. Terms are stored as typed,
/// but a term made only of whitespace counts as empty.
pub fn is_searchable(term: &str) -> bool { !term.trim().is_empty() }
