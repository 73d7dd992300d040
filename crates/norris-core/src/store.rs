//! The `FactsStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `norris-store-sqlite`).
//! The service layer depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{category::FactCategory, fact::NorrisFact, live::ChangeFeed, search::Search};

/// Abstraction over a persisted fact store.
///
/// Every write runs in a single transaction: it either commits completely or
/// leaves the store as it was. After each committed write the store bumps
/// the revision observed through [`FactsStore::changes`].
///
/// All methods return `Send` futures so the trait can be used from spawned
/// tokio tasks.
pub trait FactsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Categories ────────────────────────────────────────────────────────

  /// All categories, ordered by title.
  fn get_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<FactCategory>, Self::Error>> + Send + '_;

  /// Upsert categories by title. Idempotent.
  fn save_categories(
    &self,
    categories: Vec<FactCategory>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Facts ─────────────────────────────────────────────────────────────

  /// With an empty `search_term`, every stored fact in first-insertion
  /// order. Otherwise the facts associated with the [`Search`] record for
  /// that exact term, in result order; empty when no such search exists.
  fn get_facts<'a>(
    &'a self,
    search_term: &'a str,
  ) -> impl Future<Output = Result<Vec<NorrisFact>, Self::Error>> + Send + 'a;

  /// Upsert facts by id, along with their categories by title. Does not
  /// touch any search association.
  fn save_facts(
    &self,
    facts: Vec<NorrisFact>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Searches ──────────────────────────────────────────────────────────

  /// Upsert the [`Search`] for `term`, setting `updated_at` to now and
  /// replacing its associated facts with `facts` (which are upserted too).
  fn save_search(
    &self,
    term: String,
    facts: Vec<NorrisFact>,
  ) -> impl Future<Output = Result<Search, Self::Error>> + Send + '_;

  /// Retrieve a search and its facts. Returns `None` if not found.
  fn get_search<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Option<Search>, Self::Error>> + Send + 'a;

  /// Distinct search terms, most recently searched first.
  fn get_past_search_terms(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Maintenance ───────────────────────────────────────────────────────

  /// Delete every record.
  fn reset(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Subscribe to commit notifications.
  fn changes(&self) -> ChangeFeed;
}
