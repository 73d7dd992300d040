//! The interactive shell: one event loop over stdin, the live store feeds,
//! the search session and the background category sync.

use anyhow::Context as _;
use tokio::{
  io::{AsyncBufReadExt as _, BufReader},
  sync::mpsc,
  task::JoinHandle,
};

use norris_core::{
  category::FactCategory,
  error::FactsError,
  fact::NorrisFact,
  live::{Live, LiveQuery},
  notice::ErrorNotice,
  store::FactsStore,
};
use norris_http::Transport;
use norris_service::{FactsService, SearchOutcome, SearchSession};

use crate::{
  nav::{Navigator, Screen},
  render,
};

// ─── Subscriptions ───────────────────────────────────────────────────────────

/// A live query pumped on its own task into a channel, so the shell can
/// wait on it in `select!` without losing an update. Dropping it stops the
/// pump.
struct Subscription<T> {
  rx:   mpsc::Receiver<T>,
  task: JoinHandle<()>,
}

impl<T: Send + 'static> Subscription<T> {
  fn spawn<S, Q>(mut live: Live<S, Q>) -> Self
  where
    S: FactsStore + 'static,
    Q: LiveQuery<S, Output = T> + 'static,
  {
    let (tx, rx) = mpsc::channel(4);
    let task = tokio::spawn(async move {
      while let Some(result) = live.next().await {
        match result {
          Ok(value) => {
            if tx.send(value).await.is_err() {
              break;
            }
          }
          Err(e) => tracing::warn!(error = %e, "live query failed"),
        }
      }
    });
    Self { rx, task }
  }

  async fn recv(&mut self) -> Option<T> { self.rx.recv().await }
}

impl<T> Drop for Subscription<T> {
  fn drop(&mut self) { self.task.abort(); }
}

// ─── Commands ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  OpenSearch,
  Search(String),
  Clear,
  Share(usize),
  Back,
  Retry,
  History,
  Help,
  Quit,
  Nothing,
  Unknown(String),
}

impl Command {
  /// Interpret one input line. Free text is a search term only on the
  /// search screen.
  pub fn parse(line: &str, screen: &Screen) -> Self {
    let line = line.trim();
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
      (None, _) => Self::Nothing,
      (Some("/search"), None) => Self::OpenSearch,
      (Some("clear"), None) => Self::Clear,
      (Some("back"), None) => Self::Back,
      (Some("retry"), None) => Self::Retry,
      (Some("history"), None) => Self::History,
      (Some("help" | "?"), None) => Self::Help,
      (Some("quit" | "exit"), None) => Self::Quit,
      (Some("share"), Some(n)) => match n.parse::<usize>() {
        Ok(n) if n > 0 => Self::Share(n),
        _ => Self::Unknown(line.to_owned()),
      },
      _ if *screen == Screen::Search => Self::Search(line.to_owned()),
      _ => Self::Unknown(line.to_owned()),
    }
  }
}

// ─── Shell ───────────────────────────────────────────────────────────────────

pub struct Shell<S, T> {
  service:         FactsService<S, T>,
  session:         SearchSession<S, T>,
  nav:             Navigator,
  term:            String,
  facts:           Vec<NorrisFact>,
  categories:      Vec<FactCategory>,
  past_terms:      Vec<String>,
  feed:            Subscription<Vec<NorrisFact>>,
  categories_feed: Subscription<Vec<FactCategory>>,
  terms_feed:      Subscription<Vec<String>>,
  sync:            Option<JoinHandle<Result<(), FactsError>>>,
}

impl<S, T> Shell<S, T>
where
  S: FactsStore + Clone + 'static,
  T: Transport + Clone + 'static,
{
  pub fn new(service: FactsService<S, T>) -> Self {
    Self {
      session: SearchSession::new(service.clone()),
      nav: Navigator::new(),
      term: String::new(),
      facts: Vec::new(),
      categories: Vec::new(),
      past_terms: Vec::new(),
      feed: Subscription::spawn(service.get_facts("")),
      categories_feed: Subscription::spawn(service.get_fact_categories()),
      terms_feed: Subscription::spawn(service.get_past_search_terms()),
      sync: None,
      service,
    }
  }

  pub async fn run(mut self) -> anyhow::Result<()> {
    println!("{}", render::help());
    self.start_sync();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
      tokio::select! {
        line = lines.next_line() => {
          let Some(line) = line.context("failed to read stdin")? else { break };
          let command = Command::parse(&line, self.nav.current());
          if !self.handle(command) {
            break;
          }
        }
        Some(facts) = self.feed.recv() => {
          self.facts = facts;
          if *self.nav.current() == Screen::FactsList {
            self.show_facts();
          }
        }
        Some(categories) = self.categories_feed.recv() => self.categories = categories,
        Some(terms) = self.terms_feed.recv() => self.past_terms = terms,
        Some(outcome) = self.session.next_outcome() => self.on_search(outcome),
        Some(result) = wait_for(&mut self.sync) => self.on_sync(result),
      }
    }

    self.session.cancel();
    if let Some(task) = self.sync.take() {
      task.abort();
    }
    Ok(())
  }

  /// Apply one command. Returns `false` to quit.
  fn handle(&mut self, command: Command) -> bool {
    match command {
      Command::Quit => return false,
      Command::Nothing => {}
      Command::Help => println!("{}", render::help()),
      Command::OpenSearch => {
        self.nav.push(Screen::Search);
        println!("{}", render::search_screen(&self.categories, &self.past_terms));
      }
      Command::Search(term) => {
        self.nav.pop_to_root();
        self.set_term(term);
      }
      Command::Clear => {
        self.nav.pop_to_root();
        self.set_term(String::new());
      }
      Command::Share(n) => match self.facts.get(n - 1) {
        Some(fact) => {
          let fact = fact.clone();
          println!("{}", render::share(&fact));
          self.nav.push(Screen::Share(fact));
        }
        None => println!("There is no fact number {n}."),
      },
      Command::Back => {
        if self.nav.pop().is_some() {
          self.show_current();
        }
      }
      Command::Retry => {
        if self.sync.is_some() {
          println!("Already syncing categories.");
        } else {
          self.start_sync();
        }
      }
      Command::History => println!("{}", render::history(&self.past_terms)),
      Command::Unknown(line) => println!("Unknown command {line:?}. Type `help` for a list."),
    }
    true
  }

  fn set_term(&mut self, term: String) {
    self.feed = Subscription::spawn(self.service.get_facts(&term));
    if term.is_empty() {
      self.session.cancel();
    } else {
      println!("Searching for \"{term}\"…");
      self.session.set_term(term.clone());
    }
    self.term = term;
  }

  fn start_sync(&mut self) {
    let service = self.service.clone();
    self.sync = Some(tokio::spawn(async move { service.sync_facts_categories().await }));
  }

  fn on_sync(&mut self, result: Result<(), FactsError>) {
    if let Err(e) = result {
      tracing::debug!(error = %e, "category sync failed");
      println!("{}", render::notice(&ErrorNotice::for_error(&e, self.categories.is_empty())));
    }
  }

  fn on_search(&mut self, outcome: SearchOutcome) {
    match outcome.result {
      Ok(facts) if facts.is_empty() => println!("No facts found for \"{}\".", outcome.term),
      Ok(_) => {}
      Err(e) => {
        println!("{}", render::notice(&ErrorNotice::for_error(&e, self.facts.is_empty())));
      }
    }
  }

  fn show_facts(&self) {
    println!("{}\n{}", render::facts_header(&self.term), render::fact_list(&self.facts));
  }

  fn show_current(&self) {
    match self.nav.current() {
      Screen::FactsList => self.show_facts(),
      Screen::Search => {
        println!("{}", render::search_screen(&self.categories, &self.past_terms));
      }
      Screen::Share(fact) => println!("{}", render::share(fact)),
    }
  }
}

/// Resolve with the task's result once it finishes, clearing the slot.
/// An empty slot resolves to `None` at once, which disables the branch.
async fn wait_for<R>(slot: &mut Option<JoinHandle<R>>) -> Option<R> {
  let task = slot.as_mut()?;
  let result = task.await;
  *slot = None;
  result.ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keywords_parse_on_any_screen() {
    let screen = Screen::FactsList;
    assert_eq!(Command::parse("/search", &screen), Command::OpenSearch);
    assert_eq!(Command::parse("  back ", &screen), Command::Back);
    assert_eq!(Command::parse("share 3", &screen), Command::Share(3));
    assert_eq!(Command::parse("", &screen), Command::Nothing);
    assert_eq!(Command::parse("quit", &screen), Command::Quit);
  }

  #[test]
  fn free_text_is_a_search_only_on_the_search_screen() {
    assert_eq!(
      Command::parse("chuck norris", &Screen::Search),
      Command::Search("chuck norris".into())
    );
    assert_eq!(
      Command::parse("chuck norris", &Screen::FactsList),
      Command::Unknown("chuck norris".into())
    );
  }

  #[test]
  fn bad_share_index_is_unknown() {
    assert!(matches!(Command::parse("share 0", &Screen::FactsList), Command::Unknown(_)));
    assert!(matches!(Command::parse("share x", &Screen::FactsList), Command::Unknown(_)));
  }
}
