//! SQL schema for the wall SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Posted items, one row per recipient wall. Append-only.
CREATE TABLE IF NOT EXISTS wall_items (
    item_id      TEXT PRIMARY KEY,
    recipient_id TEXT NOT NULL,
    creator_id   TEXT NOT NULL,
    kind         TEXT NOT NULL,   -- 'event' | 'status'
    timestamp    TEXT NOT NULL,   -- RFC 3339 UTC, fixed nanosecond width
    text         TEXT NOT NULL
);

-- Symmetric relation stored once, lesser UUID first.
CREATE TABLE IF NOT EXISTS connections (
    person_a     TEXT NOT NULL,
    person_b     TEXT NOT NULL,
    connected_at TEXT NOT NULL,
    PRIMARY KEY (person_a, person_b),
    CHECK (person_a < person_b)
);

-- Latest status only; a new status replaces the row.
CREATE TABLE IF NOT EXISTS statuses (
    person_id TEXT PRIMARY KEY,
    message   TEXT NOT NULL,
    timestamp TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS privacy (
    person_id TEXT PRIMARY KEY,
    wall      TEXT NOT NULL,      -- 'everyone' | 'only_friends' | 'only_me'
    status    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS wall_items_recipient_idx
    ON wall_items(recipient_id, timestamp);
CREATE INDEX IF NOT EXISTS connections_b_idx ON connections(person_b);

PRAGMA user_version = 1;
";
