//! Moderation state and the approved-history query
//!
//! An entry is `Pending` until a moderator approves it, after which it is
//! `Approved` for good. There is no rejection state and no way back.
//! Visibility does not take part in filtering: `/history` shows every
//! approved entry regardless of its visibility flag.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entry::Entry;
use crate::phone::CanonicalPhone;
use crate::record::PhoneRecord;

/// Default number of entries returned by a history lookup
pub const DEFAULT_HISTORY_LIMIT: usize = 8;

/// Moderation state of a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ModerationState {
    Pending,
    Approved { at: Option<DateTime<Utc>> },
}

impl ModerationState {
    pub fn of(entry: &Entry) -> Self {
        if entry.approved {
            ModerationState::Approved {
                at: entry.approved_at,
            }
        } else {
            ModerationState::Pending
        }
    }
}

/// Result of an approve request against the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApproveOutcome {
    /// The entry was pending and is now approved
    Approved { phone: CanonicalPhone },
    /// The entry exists but was approved earlier; nothing changed
    AlreadyApproved { phone: CanonicalPhone },
    /// No record contains an entry with this id
    NotFound,
}

impl ApproveOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, ApproveOutcome::Approved { .. })
    }
}

/// Approved entries of `record`, the first `limit` in insertion order.
///
/// The result is not sorted by recency; it is the stored order truncated.
pub fn query_history(record: &PhoneRecord, limit: usize) -> Vec<&Entry> {
    record
        .entries
        .iter()
        .filter(|e| e.approved)
        .take(limit)
        .collect()
}
