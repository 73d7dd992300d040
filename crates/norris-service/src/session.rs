//! Latest-wins search driver.
//!
//! Setting a new term aborts whatever search is still running, including one
//! waiting out a retry back-off, and only the newest search ever reports an
//! outcome.

use tokio::{sync::mpsc, task::JoinHandle};

use norris_core::{error::FactsError, fact::NorrisFact, search::is_searchable, store::FactsStore};
use norris_http::Transport;

use crate::service::FactsService;

/// The result of the most recent search.
#[derive(Debug)]
pub struct SearchOutcome {
  pub term:   String,
  pub result: Result<Vec<NorrisFact>, FactsError>,
}

type Tagged = (u64, SearchOutcome);

pub struct SearchSession<S, T> {
  service:    FactsService<S, T>,
  current:    Option<JoinHandle<()>>,
  generation: u64,
  tx:         mpsc::UnboundedSender<Tagged>,
  rx:         mpsc::UnboundedReceiver<Tagged>,
}

impl<S, T> SearchSession<S, T>
where
  S: FactsStore + Clone + 'static,
  T: Transport + Clone + 'static,
{
  pub fn new(service: FactsService<S, T>) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self { service, current: None, generation: 0, tx, rx }
  }

  /// Start searching for `term`, superseding any search in flight. A blank
  /// term only cancels.
  pub fn set_term(&mut self, term: impl Into<String>) {
    self.cancel();

    let term = term.into();
    if !is_searchable(&term) {
      return;
    }

    let generation = self.generation;
    let service = self.service.clone();
    let tx = self.tx.clone();
    tracing::debug!(term = %term, generation, "starting search");

    self.current = Some(tokio::spawn(async move {
      let result = service.search_facts(&term).await;
      // The receiver lives as long as the session; a send can only fail
      // while the session is being dropped.
      let _ = tx.send((generation, SearchOutcome { term, result }));
    }));
  }

  /// Abort the search in flight, if any. Its outcome is never delivered.
  pub fn cancel(&mut self) {
    self.generation += 1;
    if let Some(task) = self.current.take() {
      task.abort();
    }
  }

  pub fn is_searching(&self) -> bool {
    self.current.as_ref().is_some_and(|task| !task.is_finished())
  }

  /// Wait for the outcome of the current search. Pends forever when nothing
  /// is in flight, so it is meant to sit in a `select!`.
  pub async fn next_outcome(&mut self) -> Option<SearchOutcome> {
    loop {
      let (generation, outcome) = self.rx.recv().await?;
      if generation == self.generation {
        self.current = None;
        return Some(outcome);
      }
      tracing::debug!(term = %outcome.term, "dropping superseded search outcome");
    }
  }
}

impl<S, T> Drop for SearchSession<S, T> {
  fn drop(&mut self) {
    if let Some(task) = self.current.take() {
      task.abort();
    }
  }
}
