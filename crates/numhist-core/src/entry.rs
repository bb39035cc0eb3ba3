//! History entries and the entry factory

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::error::{HistoryError, Result};

/// Maximum entry title length, in characters
pub const MAX_TITLE_CHARS: usize = 200;

/// Maximum entry description length, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Kind of history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryType {
    Call,
    Message,
    Note,
    Business,
    SpamReport,
}

impl EntryType {
    pub const ALL: [EntryType; 5] = [
        EntryType::Call,
        EntryType::Message,
        EntryType::Note,
        EntryType::Business,
        EntryType::SpamReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Call => "call",
            EntryType::Message => "message",
            EntryType::Note => "note",
            EntryType::Business => "business",
            EntryType::SpamReport => "spam-report",
        }
    }

    /// Comma-separated list of accepted names, for usage messages
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for EntryType {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(EntryType::Call),
            "message" => Ok(EntryType::Message),
            "note" => Ok(EntryType::Note),
            "business" => Ok(EntryType::Business),
            "spam-report" => Ok(EntryType::SpamReport),
            other => bail_invalid!("entry type", other),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may see an entry once approved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl FromStr for Visibility {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => bail_invalid!("visibility", other),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One history record attached to a phone number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub title: String,
    pub description: String,
    pub submitted_by: i64,
    pub submitted_name: String,
    pub timestamp: DateTime<Utc>,
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl Entry {
    /// Generate a fresh entry identifier (lowercase ULID)
    pub fn generate_id() -> String {
        ulid::Ulid::new().to_string().to_lowercase()
    }

    pub fn is_pending(&self) -> bool {
        !self.approved
    }
}

/// Truncate to at most `max` characters without splitting a code point
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Build a moderation-pending entry.
///
/// Assigns a fresh id, truncates title and description to their maximum
/// lengths, and stamps the current time. `approved` starts false.
pub fn make_entry(
    submitter_id: i64,
    submitter_name: &str,
    entry_type: EntryType,
    title: &str,
    description: &str,
    visibility: Visibility,
) -> Entry {
    Entry {
        id: Entry::generate_id(),
        entry_type,
        title: truncate_chars(title, MAX_TITLE_CHARS),
        description: truncate_chars(description, MAX_DESCRIPTION_CHARS),
        submitted_by: submitter_id,
        submitted_name: submitter_name.to_string(),
        timestamp: Utc::now(),
        approved: false,
        approved_at: None,
        visibility,
    }
}
