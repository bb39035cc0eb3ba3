//! SQLite database schema for numhist

use rusqlite::{Connection, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Result of schema creation
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaCreateResult {
    /// Fresh database, schema created
    Created,
    /// Existing database already at the current version
    Current,
}

const SCHEMA_SQL: &str = r#"
-- One row per canonical phone number
CREATE TABLE IF NOT EXISTS phone_records (
    phone TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    last_updated TEXT NOT NULL
);

-- Entries embedded in a phone record, ordered by position
CREATE TABLE IF NOT EXISTS entries (
    id TEXT PRIMARY KEY,
    phone TEXT NOT NULL REFERENCES phone_records(phone),
    position INTEGER NOT NULL,
    type TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    submitted_by INTEGER NOT NULL,
    submitted_name TEXT NOT NULL DEFAULT '',
    submitted_at TEXT NOT NULL,
    approved INTEGER NOT NULL DEFAULT 0,
    approved_at TEXT,
    visibility TEXT NOT NULL DEFAULT 'public',
    UNIQUE (phone, position)
);
CREATE INDEX IF NOT EXISTS idx_entries_submitter ON entries(submitted_by);
CREATE INDEX IF NOT EXISTS idx_entries_pending ON entries(approved, submitted_at);

-- Schema metadata
CREATE TABLE IF NOT EXISTS index_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

pub fn create_schema(conn: &Connection) -> Result<SchemaCreateResult> {
    let current_version: Option<i32> = conn
        .query_row(
            "SELECT value FROM index_meta WHERE key = 'schema_version'",
            [],
            |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .ok();

    match current_version {
        Some(v) if v >= CURRENT_SCHEMA_VERSION => Ok(SchemaCreateResult::Current),
        _ => {
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "INSERT OR REPLACE INTO index_meta (key, value) VALUES ('schema_version', ?1)",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )?;
            tracing::info!(
                version = CURRENT_SCHEMA_VERSION,
                "Database schema created"
            );
            Ok(SchemaCreateResult::Created)
        }
    }
}
