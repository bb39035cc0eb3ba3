//! SQLite-backed history store for numhist

mod entries;
mod helpers;
mod read;
mod schema;

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::entry::Entry;
use crate::error::{HistoryError, Result};
use crate::moderation::ApproveOutcome;
use crate::phone::CanonicalPhone;
use crate::record::PhoneRecord;

use schema::create_schema;

/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Persistence operations the command handlers rely on.
///
/// Every mutating call is atomic for the phone record it touches.
pub trait HistoryStore {
    /// Create the record for `phone` if absent, append `entry`, and refresh
    /// the record's last-updated timestamp
    fn submit(&self, phone: &CanonicalPhone, entry: &Entry) -> Result<()>;

    /// Point read by canonical phone
    fn lookup(&self, phone: &CanonicalPhone) -> Result<Option<PhoneRecord>>;

    /// Approve the pending entry with `entry_id`
    fn approve(&self, entry_id: &str) -> Result<ApproveOutcome>;

    /// Every entry submitted by `user_id`, paired with its record
    fn find_by_submitter(&self, user_id: i64) -> Result<Vec<(PhoneRecord, Entry)>>;

    /// Oldest pending entries first, at most `limit`
    fn pending(&self, limit: usize) -> Result<Vec<(CanonicalPhone, Entry)>>;
}

/// SQLite database for numhist
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at `db_path`, creating parent
    /// directories as needed
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    HistoryError::Other(format!(
                        "failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(db_path).map_err(|e| {
            HistoryError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| HistoryError::Other(format!("failed to enable WAL mode: {}", e)))?;

        Self::init(conn)
    }

    /// Private in-memory database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let created = create_schema(&conn)
            .map_err(|e| HistoryError::Other(format!("failed to create database schema: {}", e)))?;
        tracing::debug!(?created, "open_database");

        Ok(Database { conn })
    }

    pub fn get_record_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM phone_records", [], |r| r.get(0))
            .map_err(|e| HistoryError::Other(format!("failed to get record count: {}", e)))
    }

    pub fn get_entry_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM entries", [], |r| r.get(0))
            .map_err(|e| HistoryError::Other(format!("failed to get entry count: {}", e)))
    }
}

impl HistoryStore for Database {
    fn submit(&self, phone: &CanonicalPhone, entry: &Entry) -> Result<()> {
        self.insert_entry(phone, entry)
    }

    fn lookup(&self, phone: &CanonicalPhone) -> Result<Option<PhoneRecord>> {
        self.get_record(phone)
    }

    fn approve(&self, entry_id: &str) -> Result<ApproveOutcome> {
        self.approve_entry(entry_id)
    }

    fn find_by_submitter(&self, user_id: i64) -> Result<Vec<(PhoneRecord, Entry)>> {
        self.list_by_submitter(user_id)
    }

    fn pending(&self, limit: usize) -> Result<Vec<(CanonicalPhone, Entry)>> {
        self.list_pending(limit)
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Fold WAL changes back into the main file so rapid sequential
        // processes see each other's writes
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}
