//! Launch flags that put the app into a known state before it starts.

use std::sync::Arc;

use anyhow::Context as _;
use norris_core::store::FactsStore;
use norris_http::{
  ApiStubs, Connectivity, FactsApi, Reachability, SystemReachability, fixtures, wire,
};

/// Searches seeded by `--mock-database`, with their fixture payloads.
const SEEDED_SEARCHES: [(&str, &[u8]); 2] = [
  ("sport", fixtures::SPORT_FACTS),
  ("political", fixtures::POLITICAL_FACTS),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchFlags {
  pub reset_env:               bool,
  pub mock_database:           bool,
  pub mock_api_requests:       bool,
  pub mock_error_api_requests: bool,
  pub offline:                 bool,
}

impl LaunchFlags {
  /// Wipe and/or seed the store.
  pub async fn prepare_store<S: FactsStore>(&self, store: &S) -> anyhow::Result<()> {
    if self.reset_env {
      store.reset().await.context("failed to reset store")?;
    }

    if self.mock_database {
      for (term, payload) in SEEDED_SEARCHES {
        let facts = wire::decode_facts(payload).context("bundled fixture is malformed")?;
        store
          .save_search(term.to_owned(), facts)
          .await
          .with_context(|| format!("failed to seed search {term:?}"))?;
      }
      tracing::info!("store seeded with mock searches");
    }
    Ok(())
  }

  /// The API, stubbed when a mock flag is set. Error stubs win over
  /// fixture stubs.
  pub fn api(&self, base_url: &str) -> FactsApi {
    let api = FactsApi::new(base_url);
    if self.mock_error_api_requests {
      api.with_stubs(ApiStubs::failing(500))
    } else if self.mock_api_requests {
      api.with_stubs(ApiStubs::fixtures())
    } else {
      api
    }
  }

  /// The host's interfaces decide, unless `--offline` forces the app offline.
  pub fn reachability(&self) -> Arc<dyn Reachability> {
    if self.offline { Arc::new(Connectivity::offline()) } else { Arc::new(SystemReachability) }
  }
}

#[cfg(test)]
mod tests {
  use norris_http::Endpoint as _;
  use norris_store_sqlite::SqliteStore;

  use super::*;

  #[tokio::test]
  async fn mock_database_seeds_two_searches() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let flags = LaunchFlags { mock_database: true, ..Default::default() };
    flags.prepare_store(&store).await.unwrap();

    let mut terms = store.get_past_search_terms().await.unwrap();
    terms.sort();
    assert_eq!(terms, vec!["political", "sport"]);
    assert_eq!(store.get_facts("sport").await.unwrap().len(), 4);
  }

  #[tokio::test]
  async fn reset_runs_before_seeding() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.save_search("food".into(), vec![]).await.unwrap();

    let flags = LaunchFlags { reset_env: true, mock_database: true, ..Default::default() };
    flags.prepare_store(&store).await.unwrap();

    let terms = store.get_past_search_terms().await.unwrap();
    assert!(!terms.contains(&"food".to_owned()));
    assert_eq!(terms.len(), 2);
  }

  #[test]
  fn error_stubs_win() {
    let flags = LaunchFlags {
      mock_api_requests: true,
      mock_error_api_requests: true,
      ..Default::default()
    };
    let sample = flags.api("http://localhost/jokes").categories().sample_data();
    assert_eq!(sample.map(|r| r.status_code), Some(500));
  }

  #[test]
  fn plain_launch_hits_the_network() {
    let flags = LaunchFlags::default();
    assert!(!flags.api("http://localhost/jokes").is_stubbed());
    assert!(!LaunchFlags { offline: true, ..flags }.reachability().is_connected());
  }
}
