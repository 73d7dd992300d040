//! JSON shapes returned by the facts API.
//!
//! Timestamps arrive as `2020-01-05 13:42:19.576875` with no zone and are
//! taken to be UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use norris_core::{category::FactCategory, error::NetworkError, fact::NorrisFact};

pub const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn parse_api_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
  NaiveDateTime::parse_from_str(s, API_TIMESTAMP_FORMAT).map(|dt| dt.and_utc())
}

fn api_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
  let s = String::deserialize(d)?;
  parse_api_timestamp(&s).map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize)]
struct WireFact {
  id:         String,
  value:      String,
  icon_url:   String,
  url:        String,
  #[serde(deserialize_with = "api_timestamp")]
  created_at: DateTime<Utc>,
  #[serde(deserialize_with = "api_timestamp")]
  updated_at: DateTime<Utc>,
  #[serde(default)]
  categories: Vec<FactCategory>,
}

impl From<WireFact> for NorrisFact {
  fn from(w: WireFact) -> Self {
    NorrisFact {
      id:         w.id,
      text:       w.value,
      icon_url:   w.icon_url,
      url:        w.url,
      created_at: w.created_at,
      updated_at: w.updated_at,
      categories: w.categories,
    }
  }
}

#[derive(Debug, Deserialize)]
struct WireSearch {
  total:  usize,
  result: Vec<WireFact>,
}

/// Body of `GET /search`.
#[derive(Debug, Clone)]
pub struct SearchFactsResponse {
  pub total: usize,
  pub facts: Vec<NorrisFact>,
}

pub fn decode_categories(body: &[u8]) -> Result<Vec<FactCategory>, NetworkError> {
  serde_json::from_slice(body).map_err(NetworkError::json_mapping)
}

pub fn decode_search(body: &[u8]) -> Result<SearchFactsResponse, NetworkError> {
  let wire: WireSearch = serde_json::from_slice(body).map_err(NetworkError::json_mapping)?;
  Ok(SearchFactsResponse {
    total: wire.total,
    facts: wire.result.into_iter().map(NorrisFact::from).collect(),
  })
}

/// A bare JSON array of facts.
pub fn decode_facts(body: &[u8]) -> Result<Vec<NorrisFact>, NetworkError> {
  let wire: Vec<WireFact> = serde_json::from_slice(body).map_err(NetworkError::json_mapping)?;
  Ok(wire.into_iter().map(NorrisFact::from).collect())
}
