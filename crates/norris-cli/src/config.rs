//! Layered configuration: defaults, then an optional TOML file, then
//! `NORRIS_*` environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use norris_http::api::DEFAULT_BASE_URL;
use norris_service::{DEFAULT_DISCOVER_LIMIT, RetryPolicy};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
  pub api_base_url:     String,
  pub store_path:       PathBuf,
  pub retry_max:        u32,
  pub retry_delay_secs: u64,
  pub discover_limit:   usize,
}

impl Default for CliConfig {
  fn default() -> Self {
    let retry = RetryPolicy::default();
    Self {
      api_base_url:     DEFAULT_BASE_URL.to_owned(),
      store_path:       PathBuf::from("~/.local/share/norris/facts.sqlite3"),
      retry_max:        retry.max_retries,
      retry_delay_secs: retry.delay.as_secs(),
      discover_limit:   DEFAULT_DISCOVER_LIMIT,
    }
  }
}

impl CliConfig {
  /// Read `path` if it exists, then apply the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("NORRIS"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise CliConfig")
  }

  pub fn retry_policy(&self) -> RetryPolicy {
    RetryPolicy {
      max_retries: self.retry_max,
      delay:       Duration::from_secs(self.retry_delay_secs),
    }
  }

  /// The store path with a leading `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = CliConfig::load(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(cfg.api_base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.retry_policy(), RetryPolicy::default());
    assert_eq!(cfg.discover_limit, 10);
  }

  #[test]
  fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("norris.toml");
    std::fs::write(
      &path,
      "api_base_url = \"http://localhost:9000/jokes\"\nretry_max = 5\nretry_delay_secs = 1\n",
    )
    .unwrap();

    let cfg = CliConfig::load(&path).unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:9000/jokes");
    assert_eq!(cfg.retry_policy().max_retries, 5);
    assert_eq!(cfg.retry_policy().delay, Duration::from_secs(1));
    assert_eq!(cfg.discover_limit, 10);
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/facts.db")), PathBuf::from(home).join("facts.db"));
    assert_eq!(expand_tilde(Path::new("/tmp/facts.db")), PathBuf::from("/tmp/facts.db"));
  }
}
