//! The live facts feed behind [`crate::FactsService::get_facts`].

use std::future::Future;

use rand::seq::SliceRandom as _;

use norris_core::{fact::NorrisFact, live::LiveQuery, store::FactsStore};

/// Facts for a search term. With an empty term this is the "discover"
/// view: every stored fact, shuffled, capped to `discover_limit`.
#[derive(Debug, Clone)]
pub struct FeedQuery {
  pub search_term:    String,
  pub discover_limit: usize,
}

impl FeedQuery {
  pub fn is_discover(&self) -> bool { self.search_term.is_empty() }
}

impl<S: FactsStore> LiveQuery<S> for FeedQuery {
  type Output = Vec<NorrisFact>;

  fn fetch<'a>(
    &'a self,
    store: &'a S,
  ) -> impl Future<Output = Result<Self::Output, S::Error>> + Send + 'a {
    async move {
      let mut facts = store.get_facts(&self.search_term).await?;
      if self.is_discover() {
        facts.shuffle(&mut rand::thread_rng());
        facts.truncate(self.discover_limit);
      }
      Ok(facts)
    }
  }
}
