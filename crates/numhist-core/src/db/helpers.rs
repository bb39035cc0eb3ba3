//! Row conversion helpers

use chrono::{DateTime, SecondsFormat, Utc};

use crate::entry::{Entry, EntryType, Visibility};
use crate::error::{HistoryError, Result};

/// Column list matching [`EntryRow::from_row`]
pub(super) const ENTRY_COLUMNS: &str = "id, phone, type, title, description, submitted_by, \
     submitted_name, submitted_at, approved, approved_at, visibility";

/// Fixed-width UTC timestamps so lexical order matches time order
pub(super) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(super) fn parse_datetime(phone: &str, field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| HistoryError::corrupt_record(phone, format!("bad {} '{}': {}", field, value, e)))
}

/// Raw entry columns as stored
pub(super) struct EntryRow {
    pub id: String,
    pub phone: String,
    pub entry_type: String,
    pub title: String,
    pub description: String,
    pub submitted_by: i64,
    pub submitted_name: String,
    pub submitted_at: String,
    pub approved: bool,
    pub approved_at: Option<String>,
    pub visibility: String,
}

impl EntryRow {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(EntryRow {
            id: row.get(0)?,
            phone: row.get(1)?,
            entry_type: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            submitted_by: row.get(5)?,
            submitted_name: row.get(6)?,
            submitted_at: row.get(7)?,
            approved: row.get::<_, i64>(8)? != 0,
            approved_at: row.get(9)?,
            visibility: row.get(10)?,
        })
    }

    /// Convert into a typed entry, rejecting unknown enum values
    pub fn into_entry(self) -> Result<Entry> {
        let entry_type: EntryType = self
            .entry_type
            .parse()
            .map_err(|e| HistoryError::corrupt_record(&self.phone, e))?;
        let visibility: Visibility = self
            .visibility
            .parse()
            .map_err(|e| HistoryError::corrupt_record(&self.phone, e))?;
        let timestamp = parse_datetime(&self.phone, "submitted_at", &self.submitted_at)?;
        let approved_at = self
            .approved_at
            .as_deref()
            .map(|v| parse_datetime(&self.phone, "approved_at", v))
            .transpose()?;

        Ok(Entry {
            id: self.id,
            entry_type,
            title: self.title,
            description: self.description,
            submitted_by: self.submitted_by,
            submitted_name: self.submitted_name,
            timestamp,
            approved: self.approved,
            approved_at,
            visibility,
        })
    }
}
