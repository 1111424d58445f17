//! SQL schema for the fun-fact store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per state; at most one entry per code.
CREATE TABLE IF NOT EXISTS fun_facts (
    state_code  TEXT PRIMARY KEY,   -- upper-case two-letter code
    facts       TEXT NOT NULL,      -- JSON array of strings, insertion order
    updated_at  TEXT NOT NULL       -- ISO 8601 UTC; server-assigned
);

PRAGMA user_version = 1;
";
