use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::helpers::format_datetime;
use crate::entry::Entry;
use crate::error::Result;
use crate::map_db_err;
use crate::moderation::ApproveOutcome;
use crate::phone::CanonicalPhone;

impl super::Database {
    /// Upsert the phone record and append `entry` at the next position, all
    /// in one transaction
    pub(super) fn insert_entry(&self, phone: &CanonicalPhone, entry: &Entry) -> Result<()> {
        let now = format_datetime(&Utc::now());

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| map_db_err!("start submit transaction", e))?;

        tx.execute(
            "INSERT INTO phone_records (phone, created_at, last_updated) VALUES (?1, ?2, ?2)
             ON CONFLICT(phone) DO UPDATE SET last_updated = excluded.last_updated",
            params![phone.as_str(), now],
        )
        .map_err(|e| map_db_err!("upsert phone record", e))?;

        let position: i64 = tx
            .query_row(
                "SELECT COALESCE(MAX(position), -1) + 1 FROM entries WHERE phone = ?1",
                params![phone.as_str()],
                |r| r.get(0),
            )
            .map_err(|e| map_db_err!("compute entry position", e))?;

        tx.execute(
            "INSERT INTO entries (id, phone, position, type, title, description, submitted_by, submitted_name, submitted_at, approved, approved_at, visibility)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                entry.id,
                phone.as_str(),
                position,
                entry.entry_type.as_str(),
                entry.title,
                entry.description,
                entry.submitted_by,
                entry.submitted_name,
                format_datetime(&entry.timestamp),
                entry.approved as i64,
                entry.approved_at.as_ref().map(format_datetime),
                entry.visibility.as_str(),
            ],
        )
        .map_err(|e| map_db_err!(&format!("insert entry {}", entry.id), e))?;

        tx.commit()
            .map_err(|e| map_db_err!("commit submit transaction", e))?;

        tracing::debug!(phone = %phone, entry_id = %entry.id, position, "insert_entry");
        Ok(())
    }

    /// Flip a pending entry to approved. The guard on `approved = 0` keeps
    /// the first approval timestamp if the entry was approved already.
    pub(super) fn approve_entry(&self, entry_id: &str) -> Result<ApproveOutcome> {
        let now = format_datetime(&Utc::now());

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| map_db_err!("start approve transaction", e))?;

        let state: Option<(String, bool)> = tx
            .query_row(
                "SELECT phone, approved FROM entries WHERE id = ?1",
                params![entry_id],
                |r| Ok((r.get(0)?, r.get::<_, i64>(1)? != 0)),
            )
            .optional()
            .map_err(|e| map_db_err!("look up entry", e))?;

        let outcome = match state {
            None => ApproveOutcome::NotFound,
            Some((phone, true)) => ApproveOutcome::AlreadyApproved {
                phone: CanonicalPhone::from_stored(phone),
            },
            Some((phone, false)) => {
                let changed = tx
                    .execute(
                        "UPDATE entries SET approved = 1, approved_at = ?2 WHERE id = ?1 AND approved = 0",
                        params![entry_id, now],
                    )
                    .map_err(|e| map_db_err!(&format!("approve entry {}", entry_id), e))?;
                let phone = CanonicalPhone::from_stored(phone);
                if changed == 1 {
                    ApproveOutcome::Approved { phone }
                } else {
                    ApproveOutcome::AlreadyApproved { phone }
                }
            }
        };

        tx.commit()
            .map_err(|e| map_db_err!("commit approve transaction", e))?;

        Ok(outcome)
    }
}
