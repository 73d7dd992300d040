//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (nanosecond
//! precision, `Z` suffix) so that lexical and chronological order agree.

use chrono::{DateTime, SecondsFormat, Utc};
use norris_core::{category::FactCategory, fact::NorrisFact, search::Search};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Nanos, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Facts ───────────────────────────────────────────────────────────────────

/// Column values for one `facts` row plus its ordered category titles, ready
/// to be moved onto the connection thread.
pub struct EncodedFact {
  pub fact_id:    String,
  pub text:       String,
  pub icon_url:   String,
  pub url:        String,
  pub created_at: String,
  pub updated_at: String,
  pub categories: Vec<String>,
}

impl From<&NorrisFact> for EncodedFact {
  fn from(fact: &NorrisFact) -> Self {
    let mut categories: Vec<String> = Vec::with_capacity(fact.categories.len());
    for c in &fact.categories {
      if !categories.contains(&c.title) {
        categories.push(c.title.clone());
      }
    }
    Self {
      fact_id: fact.id.clone(),
      text: fact.text.clone(),
      icon_url: fact.icon_url.clone(),
      url: fact.url.clone(),
      created_at: encode_dt(fact.created_at),
      updated_at: encode_dt(fact.updated_at),
      categories,
    }
  }
}

/// Encode a batch, keeping the first occurrence of each id.
pub fn encode_facts(facts: &[NorrisFact]) -> Vec<EncodedFact> {
  let mut out: Vec<EncodedFact> = Vec::with_capacity(facts.len());
  for fact in facts {
    if !out.iter().any(|e| e.fact_id == fact.id) {
      out.push(EncodedFact::from(fact));
    }
  }
  out
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `facts` row and its category join.
pub struct RawFact {
  pub fact_id:    String,
  pub text:       String,
  pub icon_url:   String,
  pub url:        String,
  pub created_at: String,
  pub updated_at: String,
  pub categories: Vec<String>,
}

impl RawFact {
  pub fn into_fact(self) -> Result<NorrisFact> {
    Ok(NorrisFact {
      id:         self.fact_id,
      text:       self.text,
      icon_url:   self.icon_url,
      url:        self.url,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      categories: self.categories.into_iter().map(FactCategory::new).collect(),
    })
  }
}

/// Raw strings read directly from a `searches` row, with its facts.
pub struct RawSearch {
  pub term:       String,
  pub created_at: String,
  pub updated_at: String,
  pub facts:      Vec<RawFact>,
}

impl RawSearch {
  pub fn into_search(self) -> Result<Search> {
    Ok(Search {
      term:       self.term,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      facts:      self
        .facts
        .into_iter()
        .map(RawFact::into_fact)
        .collect::<Result<_>>()?,
    })
  }
}
