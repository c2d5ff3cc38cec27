//! SQL schema for the Rolodex SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision; a database written by a newer revision is refused.

/// Revision written to `PRAGMA user_version` after [`SCHEMA`] is applied.
pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `seq` preserves insertion order; it breaks ties when sorting and orders
-- the export. `id` is the public identifier.
CREATE TABLE IF NOT EXISTS contacts (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    id          TEXT    NOT NULL UNIQUE,
    name        TEXT    NOT NULL CHECK (name  <> ''),
    email       TEXT    NOT NULL CHECK (email <> ''),
    phone       TEXT    NOT NULL CHECK (phone <> ''),
    message     TEXT    NOT NULL DEFAULT '',
    tags        TEXT    NOT NULL DEFAULT '[]',   -- JSON array of strings
    favorite    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT    NOT NULL                 -- fixed-width RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS contacts_created_idx ON contacts(created_at);
CREATE INDEX IF NOT EXISTS contacts_name_idx    ON contacts(name);
";
