use rusqlite::{params, OptionalExtension};

use super::helpers::{parse_datetime, EntryRow, ENTRY_COLUMNS};
use crate::entry::Entry;
use crate::error::{HistoryError, Result};
use crate::phone::CanonicalPhone;
use crate::record::PhoneRecord;

impl super::Database {
    pub(super) fn get_record(&self, phone: &CanonicalPhone) -> Result<Option<PhoneRecord>> {
        let header: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT created_at, last_updated FROM phone_records WHERE phone = ?1",
                params![phone.as_str()],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()
            .map_err(|e| HistoryError::Other(format!("failed to query phone record: {}", e)))?;

        let Some((created_at, last_updated)) = header else {
            return Ok(None);
        };

        let entries = self.load_entries(phone)?;

        Ok(Some(PhoneRecord {
            phone: phone.clone(),
            entries,
            created_at: parse_datetime(phone.as_str(), "created_at", &created_at)?,
            last_updated: parse_datetime(phone.as_str(), "last_updated", &last_updated)?,
        }))
    }

    fn load_entries(&self, phone: &CanonicalPhone) -> Result<Vec<Entry>> {
        let sql = format!(
            "SELECT {} FROM entries WHERE phone = ?1 ORDER BY position",
            ENTRY_COLUMNS
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| HistoryError::Other(format!("failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map(params![phone.as_str()], EntryRow::from_row)
            .map_err(|e| HistoryError::Other(format!("failed to query entries: {}", e)))?;

        let mut entries = Vec::new();
        for row in rows {
            let row = row.map_err(|e| HistoryError::Other(format!("failed to read entry: {}", e)))?;
            entries.push(row.into_entry()?);
        }
        Ok(entries)
    }

    /// Records holding at least one entry by `user_id`, in creation order,
    /// then the matching entries of each
    pub(super) fn list_by_submitter(&self, user_id: i64) -> Result<Vec<(PhoneRecord, Entry)>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT p.phone FROM phone_records p
                 WHERE EXISTS (SELECT 1 FROM entries e WHERE e.phone = p.phone AND e.submitted_by = ?1)
                 ORDER BY p.rowid",
            )
            .map_err(|e| HistoryError::Other(format!("failed to prepare query: {}", e)))?;

        let phones = stmt
            .query_map(params![user_id], |r| r.get::<_, String>(0))
            .map_err(|e| HistoryError::Other(format!("failed to query submitter records: {}", e)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut out = Vec::new();
        for phone in phones {
            let phone = CanonicalPhone::from_stored(phone);
            let Some(record) = self.get_record(&phone)? else {
                continue;
            };
            let mine: Vec<Entry> = record
                .entries
                .iter()
                .filter(|e| e.submitted_by == user_id)
                .cloned()
                .collect();
            for entry in mine {
                out.push((record.clone(), entry));
            }
        }
        Ok(out)
    }

    pub(super) fn list_pending(&self, limit: usize) -> Result<Vec<(CanonicalPhone, Entry)>> {
        let sql = format!(
            "SELECT {} FROM entries WHERE approved = 0 ORDER BY submitted_at, rowid LIMIT ?1",
            ENTRY_COLUMNS
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| HistoryError::Other(format!("failed to prepare query: {}", e)))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![limit], EntryRow::from_row)
            .map_err(|e| HistoryError::Other(format!("failed to query pending entries: {}", e)))?;

        let mut out = Vec::new();
        for row in rows {
            let row = row.map_err(|e| HistoryError::Other(format!("failed to read entry: {}", e)))?;
            let phone = CanonicalPhone::from_stored(row.phone.clone());
            out.push((phone, row.into_entry()?));
        }
        Ok(out)
    }
}
