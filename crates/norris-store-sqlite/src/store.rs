//! [`SqliteStore`] — the SQLite implementation of [`FactsStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use norris_core::{
  category::FactCategory,
  fact::NorrisFact,
  live::{ChangeFeed, ChangeNotifier},
  search::Search,
  store::FactsStore,
};

use crate::{
  encode::{EncodedFact, RawFact, RawSearch, encode_dt, encode_facts},
  schema::SCHEMA,
  Result,
};

const FACT_COLUMNS: &str =
  "f.fact_id, f.text, f.icon_url, f.url, f.created_at, f.updated_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A NorrisFacts store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection and the change notifier are
/// reference-counted, so every clone observes the same commits.
#[derive(Clone)]
pub struct SqliteStore {
  conn:    tokio_rusqlite::Connection,
  changes: ChangeNotifier,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, changes: ChangeNotifier::new() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, changes: ChangeNotifier::new() };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row helpers (run on the connection thread) ──────────────────────────────

/// Insert or update one fact and replace its category list.
fn upsert_fact(conn: &rusqlite::Connection, fact: &EncodedFact) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO facts (fact_id, text, icon_url, url, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     ON CONFLICT(fact_id) DO UPDATE SET
       text       = excluded.text,
       icon_url   = excluded.icon_url,
       url        = excluded.url,
       created_at = excluded.created_at,
       updated_at = excluded.updated_at",
    rusqlite::params![
      fact.fact_id,
      fact.text,
      fact.icon_url,
      fact.url,
      fact.created_at,
      fact.updated_at,
    ],
  )?;

  conn.execute(
    "DELETE FROM fact_categories WHERE fact_id = ?1",
    rusqlite::params![fact.fact_id],
  )?;

  for (position, title) in fact.categories.iter().enumerate() {
    upsert_category(conn, title)?;
    conn.execute(
      "INSERT INTO fact_categories (fact_id, title, position) VALUES (?1, ?2, ?3)",
      rusqlite::params![fact.fact_id, title, position as i64],
    )?;
  }
  Ok(())
}

fn upsert_category(conn: &rusqlite::Connection, title: &str) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO categories (title) VALUES (?1) ON CONFLICT(title) DO NOTHING",
    rusqlite::params![title],
  )?;
  Ok(())
}

/// Run a `SELECT` over [`FACT_COLUMNS`] and attach each fact's categories.
fn load_facts<P: rusqlite::Params>(
  conn: &rusqlite::Connection,
  sql: &str,
  params: P,
) -> rusqlite::Result<Vec<RawFact>> {
  let mut stmt = conn.prepare(sql)?;
  let mut facts = stmt
    .query_map(params, |row| {
      Ok(RawFact {
        fact_id:    row.get(0)?,
        text:       row.get(1)?,
        icon_url:   row.get(2)?,
        url:        row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
        categories: Vec::new(),
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut categories = conn.prepare(
    "SELECT title FROM fact_categories WHERE fact_id = ?1 ORDER BY position",
  )?;
  for fact in &mut facts {
    fact.categories = categories
      .query_map(rusqlite::params![fact.fact_id], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
  }
  Ok(facts)
}

fn load_search_facts(conn: &rusqlite::Connection, term: &str) -> rusqlite::Result<Vec<RawFact>> {
  load_facts(
    conn,
    &format!(
      "SELECT {FACT_COLUMNS}
       FROM search_facts sf
       JOIN facts f ON f.fact_id = sf.fact_id
       WHERE sf.term = ?1
       ORDER BY sf.position"
    ),
    rusqlite::params![term],
  )
}

// ─── FactsStore impl ─────────────────────────────────────────────────────────
//
// Writes notify from inside the `call` closure, right after the commit, so a
// caller that drops the future mid-write still wakes the live feeds.

impl FactsStore for SqliteStore {
  type Error = crate::Error;

  // ── Categories ────────────────────────────────────────────────────────────

  async fn get_categories(&self) -> Result<Vec<FactCategory>> {
    let titles: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT title FROM categories ORDER BY title")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(titles.into_iter().map(FactCategory::new).collect())
  }

  async fn save_categories(&self, categories: Vec<FactCategory>) -> Result<()> {
    let titles: Vec<String> = categories.into_iter().map(|c| c.title).collect();
    let count = titles.len();
    let changes = self.changes.clone();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for title in &titles {
          upsert_category(&tx, title)?;
        }
        tx.commit()?;
        changes.notify();
        Ok(())
      })
      .await?;

    tracing::debug!(count, "saved categories");
    Ok(())
  }

  // ── Facts ─────────────────────────────────────────────────────────────────

  async fn get_facts(&self, search_term: &str) -> Result<Vec<NorrisFact>> {
    let term = search_term.to_owned();

    let raws: Vec<RawFact> = self
      .conn
      .call(move |conn| {
        let rows = if term.is_empty() {
          load_facts(
            conn,
            &format!("SELECT {FACT_COLUMNS} FROM facts f ORDER BY f.rowid"),
            [],
          )?
        } else {
          load_search_facts(conn, &term)?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFact::into_fact).collect()
  }

  async fn save_facts(&self, facts: Vec<NorrisFact>) -> Result<()> {
    let encoded = encode_facts(&facts);
    let count = encoded.len();
    let changes = self.changes.clone();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for fact in &encoded {
          upsert_fact(&tx, fact)?;
        }
        tx.commit()?;
        changes.notify();
        Ok(())
      })
      .await?;

    tracing::debug!(count, "saved facts");
    Ok(())
  }

  // ── Searches ──────────────────────────────────────────────────────────────

  async fn save_search(&self, term: String, facts: Vec<NorrisFact>) -> Result<Search> {
    let encoded    = encode_facts(&facts);
    let updated_at = Utc::now();
    let now_str    = encode_dt(updated_at);
    let term_owned = term.clone();
    let changes    = self.changes.clone();

    let raw: RawSearch = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        for fact in &encoded {
          upsert_fact(&tx, fact)?;
        }

        tx.execute(
          "INSERT INTO searches (term, created_at, updated_at, seq)
           VALUES (?1, ?2, ?2, (SELECT COALESCE(MAX(seq), 0) + 1 FROM searches))
           ON CONFLICT(term) DO UPDATE SET
             updated_at = excluded.updated_at,
             seq        = excluded.seq",
          rusqlite::params![term_owned, now_str],
        )?;

        tx.execute(
          "DELETE FROM search_facts WHERE term = ?1",
          rusqlite::params![term_owned],
        )?;
        for (position, fact) in encoded.iter().enumerate() {
          tx.execute(
            "INSERT INTO search_facts (term, fact_id, position) VALUES (?1, ?2, ?3)",
            rusqlite::params![term_owned, fact.fact_id, position as i64],
          )?;
        }

        let (created_at, updated_at): (String, String) = tx.query_row(
          "SELECT created_at, updated_at FROM searches WHERE term = ?1",
          rusqlite::params![term_owned],
          |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let facts = load_search_facts(&tx, &term_owned)?;

        tx.commit()?;
        changes.notify();
        Ok(RawSearch { term: term_owned, created_at, updated_at, facts })
      })
      .await?;

    tracing::debug!(term = %term, facts = raw.facts.len(), "saved search");
    raw.into_search()
  }

  async fn get_search(&self, term: &str) -> Result<Option<Search>> {
    let term = term.to_owned();

    let raw: Option<RawSearch> = self
      .conn
      .call(move |conn| {
        let row: Option<(String, String)> = conn
          .query_row(
            "SELECT created_at, updated_at FROM searches WHERE term = ?1",
            rusqlite::params![term],
            |row| Ok((row.get(0)?, row.get(1)?)),
          )
          .optional()?;

        let Some((created_at, updated_at)) = row else {
          return Ok(None);
        };
        let facts = load_search_facts(conn, &term)?;
        Ok(Some(RawSearch { term, created_at, updated_at, facts }))
      })
      .await?;

    raw.map(RawSearch::into_search).transpose()
  }

  async fn get_past_search_terms(&self) -> Result<Vec<String>> {
    let terms = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT term FROM searches ORDER BY seq DESC")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(terms)
  }

  // ── Maintenance ───────────────────────────────────────────────────────────

  async fn reset(&self) -> Result<()> {
    let changes = self.changes.clone();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(
          "DELETE FROM search_facts;
           DELETE FROM searches;
           DELETE FROM fact_categories;
           DELETE FROM facts;
           DELETE FROM categories;",
        )?;
        tx.commit()?;
        changes.notify();
        Ok(())
      })
      .await?;

    tracing::info!("store reset");
    Ok(())
  }

  fn changes(&self) -> ChangeFeed { self.changes.subscribe() }
}
