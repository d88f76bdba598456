//! SQL schema for the reel SQLite store.
//!
//! Executed on every open via `CREATE TABLE IF NOT EXISTS`; safe to run
//! against an existing database — it never drops or alters data. Future
//! migrations will be gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent.
///
/// `entries.item_id` declares its reference to `items.id` but the
/// `foreign_keys` pragma is deliberately left at its default (off): items
/// are never deleted by this layer, and joined reads exclude any entry whose
/// item is missing rather than refusing to store it.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
-- Keep foreign-key enforcement off as documented above. The default is off
-- upstream, but the bundled SQLite is built with SQLITE_DEFAULT_FOREIGN_KEYS=1,
-- so it must be disabled explicitly for this connection.
PRAGMA foreign_keys = OFF;

CREATE TABLE IF NOT EXISTS items (
    id              TEXT PRIMARY KEY,
    external_id     TEXT UNIQUE,
    title           TEXT NOT NULL,
    release_year    TEXT NOT NULL,
    kind            TEXT NOT NULL,   -- 'movie' | 'series'
    poster_url      TEXT,
    plot            TEXT,
    genre           TEXT,
    director        TEXT,
    actors          TEXT,
    runtime         TEXT,
    external_rating TEXT
);

-- AUTOINCREMENT so entry ids are monotonic and never reused, even after
-- deletes.
CREATE TABLE IF NOT EXISTS entries (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    item_id         TEXT NOT NULL REFERENCES items(id),
    status          TEXT NOT NULL,   -- 'watching' | 'completed' | 'watchlist' | 'dropped'
    personal_rating INTEGER,
    review          TEXT,
    progress        TEXT,
    date_added      TEXT NOT NULL,   -- RFC 3339 UTC; caller-supplied
    date_completed  TEXT
);

CREATE INDEX IF NOT EXISTS entries_item_idx   ON entries(item_id);
CREATE INDEX IF NOT EXISTS entries_status_idx ON entries(status);
CREATE INDEX IF NOT EXISTS entries_added_idx  ON entries(date_added);

PRAGMA user_version = 1;
";
