//! `norris` — fetch, search and browse facts from the terminal.
//!
//! # Usage
//!
//! ```
//! norris sync
//! norris search sport
//! norris --mock-database --offline shell
//! ```

mod config;
mod launch;
mod nav;
mod render;
mod shell;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use norris_core::{error::FactsError, notice::ErrorNotice, store::FactsStore};
use norris_http::HttpClient;
use norris_service::FactsService;
use norris_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{
  config::{CliConfig, expand_tilde},
  launch::LaunchFlags,
  shell::Shell,
};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "norris", version, about = "Chuck Norris facts, synced and searchable")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "norris.toml")]
  config: PathBuf,

  /// SQLite store location; overrides `store_path` from the config.
  #[arg(long, value_name = "PATH", env = "NORRIS_STORE")]
  store: Option<PathBuf>,

  /// Behave as if there were no network connection.
  #[arg(long)]
  offline: bool,

  /// Delete every stored record before starting.
  #[arg(long)]
  reset_env: bool,

  /// Seed the store with the bundled `sport` and `political` searches.
  #[arg(long)]
  mock_database: bool,

  /// Answer API requests from bundled fixtures.
  #[arg(long)]
  mock_api_requests: bool,

  /// Answer every API request with HTTP 500.
  #[arg(long)]
  mock_error_api_requests: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Seed categories from the API.
  Sync,
  /// List stored categories.
  Categories,
  /// Show stored facts; the discover view when TERM is absent.
  Facts { term: Option<String> },
  /// Search the API, store and print the result.
  Search { term: String },
  /// Past search terms, most recent first.
  History,
  /// Interactive session.
  Shell,
}

impl Cli {
  fn launch_flags(&self) -> LaunchFlags {
    LaunchFlags {
      reset_env:               self.reset_env,
      mock_database:           self.mock_database,
      mock_api_requests:       self.mock_api_requests,
      mock_error_api_requests: self.mock_error_api_requests,
      offline:                 self.offline,
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so command output stays pipeable.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = CliConfig::load(&cli.config)?;
  let flags = cli.launch_flags();

  let store_path = cli
    .store
    .as_deref()
    .map(expand_tilde)
    .unwrap_or_else(|| cfg.resolved_store_path());
  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  flags.prepare_store(&store).await?;

  let client = HttpClient::new(flags.reachability()).context("failed to build HTTP client")?;
  let service = FactsService::new(store, client, flags.api(&cfg.api_base_url))
    .with_retry(cfg.retry_policy())
    .with_discover_limit(cfg.discover_limit);

  match cli.command {
    Command::Sync => {
      service
        .sync_facts_categories()
        .await
        .map_err(|e| report(e, true))?;
      let count = service.get_fact_categories().current().await?.len();
      println!("{count} categories stored.");
    }
    Command::Categories => {
      for category in service.get_fact_categories().current().await? {
        println!("{}", category.title);
      }
    }
    Command::Facts { term } => {
      let term = term.unwrap_or_default();
      let facts = service.get_facts(&term).current().await?;
      println!("{}\n{}", render::facts_header(&term), render::fact_list(&facts));
    }
    Command::Search { term } => {
      let facts = service.search_facts(&term).await.map_err(|e| report(e, true))?;
      println!("{}\n{}", render::facts_header(&term), render::fact_list(&facts));
    }
    Command::History => {
      let terms = service.store().get_past_search_terms().await?;
      println!("{}", render::history(&terms));
    }
    Command::Shell => Shell::new(service).run().await?,
  }

  Ok(())
}

/// Print the user-facing notice for `error` and turn it into a failure.
fn report(error: FactsError, list_is_empty: bool) -> anyhow::Error {
  eprintln!("{}", render::notice(&ErrorNotice::for_error(&error, list_is_empty)));
  anyhow::Error::new(error)
}
