//! Bundled API payloads used for stubbed runs, store seeding and tests.

/// `GET /categories`.
pub const CATEGORIES: &[u8] = include_bytes!("../fixtures/categories.json");

/// `GET /search?query=…` with four results.
pub const SEARCH_RESPONSE: &[u8] = include_bytes!("../fixtures/search-facts-response.json");

/// Thirteen facts, as a bare array.
pub const FACTS: &[u8] = include_bytes!("../fixtures/facts.json");

pub const SPORT_FACTS: &[u8] = include_bytes!("../fixtures/sport-facts.json");

pub const POLITICAL_FACTS: &[u8] = include_bytes!("../fixtures/political-facts.json");
