//! SQL schema for the NorrisFacts SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS categories (
    title       TEXT PRIMARY KEY
);

-- Upserted by fact_id; rowid keeps first-insertion order.
CREATE TABLE IF NOT EXISTS facts (
    fact_id     TEXT PRIMARY KEY,
    text        TEXT NOT NULL,
    icon_url    TEXT NOT NULL,
    url         TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC, nanosecond precision
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS fact_categories (
    fact_id     TEXT NOT NULL REFERENCES facts(fact_id) ON DELETE CASCADE,
    title       TEXT NOT NULL REFERENCES categories(title) ON DELETE CASCADE,
    position    INTEGER NOT NULL,
    PRIMARY KEY (fact_id, title)
);

-- One row per distinct term. `seq` is bumped on every save so recency
-- ordering never depends on clock resolution.
CREATE TABLE IF NOT EXISTS searches (
    term        TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    seq         INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS search_facts (
    term        TEXT NOT NULL REFERENCES searches(term) ON DELETE CASCADE,
    fact_id     TEXT NOT NULL REFERENCES facts(fact_id) ON DELETE CASCADE,
    position    INTEGER NOT NULL,
    PRIMARY KEY (term, fact_id)
);

CREATE INDEX IF NOT EXISTS search_facts_term_idx ON search_facts(term, position);
CREATE INDEX IF NOT EXISTS searches_seq_idx      ON searches(seq);

PRAGMA user_version = 1;
";
