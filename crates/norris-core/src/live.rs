//! Live queries: explicit change notification attached to a store.
//!
//! A store owns a [`ChangeNotifier`] and bumps it after every committed
//! write. [`Live`] pairs a store with a [`LiveQuery`] and yields a fresh
//! snapshot each time the revision moves. Bursts of writes are coalesced:
//! a slow reader sees the latest committed state, never a partial write.

use std::{future::Future, sync::Arc};

use tokio::sync::watch;

use crate::{category::FactCategory, fact::NorrisFact, store::FactsStore};

/// Monotonic count of committed writes.
pub type Revision = u64;

// ─── Notifier ────────────────────────────────────────────────────────────────

/// Write side of the change feed, held by the store.
///
/// Cloning is cheap; clones share one revision counter.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
  tx: Arc<watch::Sender<Revision>>,
}

impl ChangeNotifier {
  pub fn new() -> Self {
    let (tx, _) = watch::channel(0);
    Self { tx: Arc::new(tx) }
  }

  /// Record a committed write and wake every subscriber.
  pub fn notify(&self) { self.tx.send_modify(|rev| *rev += 1); }

  pub fn revision(&self) -> Revision { *self.tx.borrow() }

  pub fn subscribe(&self) -> ChangeFeed { ChangeFeed { rx: self.tx.subscribe() } }
}

impl Default for ChangeNotifier {
  fn default() -> Self { Self::new() }
}

/// Read side of the change feed.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
  rx: watch::Receiver<Revision>,
}

impl ChangeFeed {
  /// Mark the current revision as seen and return it.
  pub fn mark_seen(&mut self) -> Revision { *self.rx.borrow_and_update() }

  /// Wait until the revision moves past the last seen one. Returns `None`
  /// once the store has been dropped.
  pub async fn changed(&mut self) -> Option<Revision> {
    self.rx.changed().await.ok()?;
    Some(self.mark_seen())
  }
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// A read that can be re-run against a store whenever it changes.
pub trait LiveQuery<S: FactsStore>: Send + Sync {
  type Output: Send;

  fn fetch<'a>(
    &'a self,
    store: &'a S,
  ) -> impl Future<Output = Result<Self::Output, S::Error>> + Send + 'a;
}

/// Every category, ordered by title.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoriesQuery;

impl<S: FactsStore> LiveQuery<S> for CategoriesQuery {
  type Output = Vec<FactCategory>;

  fn fetch<'a>(
    &'a self,
    store: &'a S,
  ) -> impl Future<Output = Result<Self::Output, S::Error>> + Send + 'a {
    store.get_categories()
  }
}

/// Facts for a search term, or all facts when the term is empty.
#[derive(Debug, Clone, Default)]
pub struct FactsQuery {
  pub search_term: String,
}

impl<S: FactsStore> LiveQuery<S> for FactsQuery {
  type Output = Vec<NorrisFact>;

  fn fetch<'a>(
    &'a self,
    store: &'a S,
  ) -> impl Future<Output = Result<Self::Output, S::Error>> + Send + 'a {
    store.get_facts(&self.search_term)
  }
}

/// Distinct search terms, most recent first.
#[derive(Debug, Clone, Copy, Default)]
pub struct PastSearchTermsQuery;

impl<S: FactsStore> LiveQuery<S> for PastSearchTermsQuery {
  type Output = Vec<String>;

  fn fetch<'a>(
    &'a self,
    store: &'a S,
  ) -> impl Future<Output = Result<Self::Output, S::Error>> + Send + 'a {
    store.get_past_search_terms()
  }
}

// ─── Live ────────────────────────────────────────────────────────────────────

/// A query subscription that re-emits after every committed write.
pub struct Live<S, Q> {
  store:  S,
  query:  Q,
  feed:   ChangeFeed,
  primed: bool,
}

impl<S, Q> Live<S, Q>
where
  S: FactsStore,
  Q: LiveQuery<S>,
{
  pub fn new(store: S, query: Q) -> Self {
    let feed = store.changes();
    Self { store, query, feed, primed: false }
  }

  pub fn query(&self) -> &Q { &self.query }

  /// The first call yields the current snapshot immediately. Later calls
  /// wait for the next commit. Returns `None` when the store is gone.
  pub async fn next(&mut self) -> Option<Result<Q::Output, S::Error>> {
    if self.primed {
      self.feed.changed().await?;
    } else {
      self.primed = true;
      self.feed.mark_seen();
    }
    Some(self.query.fetch(&self.store).await)
  }

  /// Run the query once without consuming a notification.
  pub async fn current(&self) -> Result<Q::Output, S::Error> {
    self.query.fetch(&self.store).await
  }
}
