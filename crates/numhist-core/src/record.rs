//! Phone record aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::phone::CanonicalPhone;

/// All entries submitted for one canonical phone number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub phone: CanonicalPhone,
    /// Entries in insertion order
    pub entries: Vec<Entry>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl PhoneRecord {
    pub fn approved_count(&self) -> usize {
        self.entries.iter().filter(|e| e.approved).count()
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len() - self.approved_count()
    }
}
