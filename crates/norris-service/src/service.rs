//! [`FactsService`] — category sync, search and live feeds.

use bytes::Bytes;

use norris_core::{
  error::{FactsError, NetworkError},
  fact::NorrisFact,
  live::{CategoriesQuery, Live, PastSearchTermsQuery},
  search::is_searchable,
  store::FactsStore,
};
use norris_http::{ApiRequest, FactsApi, Transport, wire};

use crate::{feed::FeedQuery, retry::RetryPolicy};

/// Size of the discover view shown when no search term is set.
pub const DEFAULT_DISCOVER_LIMIT: usize = 10;

/// Coordinates a [`FactsStore`] with the facts API.
///
/// Network failures surface as [`FactsError`]. Store failures are logged
/// and do not fail the operation: the remote exchange already succeeded,
/// and live feeds keep showing what the store holds.
#[derive(Clone)]
pub struct FactsService<S, T> {
  store:          S,
  transport:      T,
  api:            FactsApi,
  retry:          RetryPolicy,
  discover_limit: usize,
}

impl<S, T> FactsService<S, T>
where
  S: FactsStore + Clone,
  T: Transport,
{
  pub fn new(store: S, transport: T, api: FactsApi) -> Self {
    Self {
      store,
      transport,
      api,
      retry: RetryPolicy::default(),
      discover_limit: DEFAULT_DISCOVER_LIMIT,
    }
  }

  pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
    self.retry = retry;
    self
  }

  pub fn with_discover_limit(mut self, limit: usize) -> Self {
    self.discover_limit = limit;
    self
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn transport(&self) -> &T { &self.transport }

  // ── Categories ────────────────────────────────────────────────────────────

  /// Seed the category list from the API.
  ///
  /// A store that already holds any category is left alone and no request
  /// is made.
  pub async fn sync_facts_categories(&self) -> Result<(), FactsError> {
    match self.store.get_categories().await {
      Ok(existing) if !existing.is_empty() => {
        tracing::debug!(count = existing.len(), "categories already stored; skipping sync");
        return Ok(());
      }
      Ok(_) => {}
      Err(e) => tracing::warn!(error = %e, "could not read stored categories; syncing anyway"),
    }

    let body = self
      .fetch(|| self.api.categories())
      .await
      .map_err(FactsError::SyncCategoriesFailed)?;
    let categories = wire::decode_categories(&body).map_err(FactsError::SyncCategoriesFailed)?;

    let count = categories.len();
    match self.store.save_categories(categories).await {
      Ok(()) => tracing::info!(count, "synced fact categories"),
      Err(e) => tracing::warn!(error = %e, count, "could not persist fact categories"),
    }
    Ok(())
  }

  /// Live list of every stored category.
  pub fn get_fact_categories(&self) -> Live<S, CategoriesQuery> {
    Live::new(self.store.clone(), CategoriesQuery)
  }

  // ── Facts ─────────────────────────────────────────────────────────────────

  /// Search the API for `term` and record the result as the term's search.
  ///
  /// A blank term is a no-op. On failure the store is not touched.
  pub async fn search_facts(&self, term: &str) -> Result<Vec<NorrisFact>, FactsError> {
    if !is_searchable(term) {
      tracing::debug!("blank search term; nothing to do");
      return Ok(Vec::new());
    }

    let body = self
      .fetch(|| self.api.search(term))
      .await
      .map_err(FactsError::LoadFactsFailed)?;
    let response = wire::decode_search(&body).map_err(FactsError::LoadFactsFailed)?;
    tracing::debug!(term, total = response.total, "search response decoded");

    match self.store.save_search(term.to_owned(), response.facts.clone()).await {
      Ok(search) => {
        tracing::info!(term, facts = search.facts.len(), "search saved");
        Ok(search.facts)
      }
      Err(e) => {
        tracing::warn!(error = %e, term, "could not persist search");
        Ok(response.facts)
      }
    }
  }

  /// Live facts for `search_term`, or the discover view when it is empty.
  pub fn get_facts(&self, search_term: &str) -> Live<S, FeedQuery> {
    Live::new(self.store.clone(), FeedQuery {
      search_term:    search_term.to_owned(),
      discover_limit: self.discover_limit,
    })
  }

  /// Live distinct search terms, most recent first.
  pub fn get_past_search_terms(&self) -> Live<S, PastSearchTermsQuery> {
    Live::new(self.store.clone(), PastSearchTermsQuery)
  }

  // ── Transport ─────────────────────────────────────────────────────────────

  /// Issue `request` under the retry policy. Statuses in `[400, 600)` are
  /// failures here.
  async fn fetch(&self, request: impl Fn() -> ApiRequest) -> Result<Bytes, NetworkError> {
    self
      .retry
      .run(|| {
        let handle = self.transport.send(request());
        async move {
          let response = match handle.outcome().await {
            Some(result) => result?,
            None => return Err(NetworkError::Unknown(None)),
          };
          match NetworkError::from_status(response.status_code) {
            Some(e) => Err(e),
            None => Ok(response.body),
          }
        }
      })
      .await
  }
}
