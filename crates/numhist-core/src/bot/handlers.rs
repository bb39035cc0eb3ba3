//! Individual command handlers

use serde_json::json;

use super::{split_pipe_args, CommandHandler, Reply, Sender};
use crate::db::HistoryStore;
use crate::entry::{make_entry, truncate_chars, Entry, EntryType, Visibility};
use crate::error::Result;
use crate::moderation::{query_history, ApproveOutcome, ModerationState};
use crate::phone::normalize_with;

const HELP_TEXT: &str = "📌 Number History Bot\n\nCommands:\n\
/addhistory <number> | <type> | <description>\n\
/history <number>\n\
/myuploads\n\n\
⚠️ All submissions go to moderation.";

const ADD_USAGE: &str = "Usage:\n/addhistory <number> | <type> | <description>";
const ADD_MISSING_PARTS: &str = "Provide: number | type | description";
const INVALID_NUMBER_ADD: &str = "Invalid number!";
const HISTORY_USAGE: &str = "Usage: /history <number>";
const INVALID_NUMBER_HISTORY: &str = "Invalid number";
const NO_HISTORY: &str = "❌ No history found.";
const NO_APPROVED: &str = "No approved public entries found!";
const NO_UPLOADS: &str = "No uploads.";
const APPROVE_USAGE: &str = "Usage: /approve id";
const NO_PENDING: &str = "No entries awaiting moderation.";

/// Maximum entries listed by `/pending`
const PENDING_LIMIT: usize = 20;

/// Description preview length in `/pending`
const PENDING_PREVIEW_CHARS: usize = 60;

pub(super) fn start() -> Reply {
    Reply::text(HELP_TEXT)
}

fn history_line(entry: &Entry) -> String {
    format!(
        "• {} ({})\n{}\n",
        entry.entry_type.as_str().to_uppercase(),
        entry.timestamp.format("%Y-%m-%d"),
        entry.description
    )
}

impl<'a, S: HistoryStore> CommandHandler<'a, S> {
    pub(super) fn add_history(&self, sender: &Sender, args: &str) -> Result<Reply> {
        if args.is_empty() {
            return Ok(Reply::text(ADD_USAGE));
        }

        let parts = split_pipe_args(args);
        if parts.len() < 3 {
            return Ok(Reply::text(ADD_MISSING_PARTS));
        }

        let Ok(entry_type) = parts[1].parse::<EntryType>() else {
            return Ok(Reply::text(format!("Type must be: {}", EntryType::names())));
        };

        let Some(phone) = normalize_with(parts[0], &self.config.country_code) else {
            return Ok(Reply::text(INVALID_NUMBER_ADD));
        };

        // Segments after the description are dropped
        let description = parts[2];
        let title = format!("{} entry", entry_type);
        let entry = make_entry(
            sender.id,
            &sender.name,
            entry_type,
            &title,
            description,
            Visibility::Public,
        );

        self.store.submit(&phone, &entry)?;
        tracing::info!(
            phone = %phone,
            entry_id = %entry.id,
            user_id = sender.id,
            entry_type = %entry_type,
            "entry submitted for moderation"
        );

        Ok(Reply::text(format!(
            "✅ Submitted for moderation!\nEntry ID: {}",
            entry.id
        ))
        .with_data(json!({
            "phone": phone,
            "entry_id": entry.id,
            "type": entry_type,
            "approved": false,
        })))
    }

    pub(super) fn history(&self, args: &str) -> Result<Reply> {
        if args.is_empty() {
            return Ok(Reply::text(HISTORY_USAGE));
        }

        let Some(phone) = normalize_with(args, &self.config.country_code) else {
            return Ok(Reply::text(INVALID_NUMBER_HISTORY));
        };

        let Some(record) = self.store.lookup(&phone)? else {
            return Ok(Reply::text(NO_HISTORY).with_data(json!({
                "phone": phone,
                "found": false,
                "entries": [],
            })));
        };

        let approved = query_history(&record, self.config.history_limit);
        tracing::debug!(
            phone = %phone,
            total = record.entries.len(),
            approved = record.approved_count(),
            pending = record.pending_count(),
            shown = approved.len(),
            "history_lookup"
        );

        if approved.is_empty() {
            return Ok(Reply::text(NO_APPROVED).with_data(json!({
                "phone": phone,
                "found": true,
                "entries": [],
            })));
        }

        let mut lines = vec![format!("✅ History for {}:\n", phone)];
        lines.extend(approved.iter().map(|e| history_line(e)));

        let data = json!({
            "phone": phone,
            "found": true,
            "entries": approved
                .iter()
                .map(|e| json!({
                    "type": e.entry_type,
                    "date": e.timestamp.format("%Y-%m-%d").to_string(),
                    "description": e.description,
                }))
                .collect::<Vec<_>>(),
        });

        Ok(Reply::text(lines.join("\n")).with_data(data))
    }

    pub(super) fn my_uploads(&self, sender: &Sender) -> Result<Reply> {
        let uploads = self.store.find_by_submitter(sender.id)?;
        if uploads.is_empty() {
            return Ok(Reply::text(NO_UPLOADS).with_data(json!({ "uploads": [] })));
        }

        let lines: Vec<String> = uploads
            .iter()
            .map(|(record, entry)| {
                format!("{} | {} | approved: {}", entry.id, record.phone, entry.approved)
            })
            .collect();

        let data = json!({
            "uploads": uploads
                .iter()
                .map(|(record, entry)| json!({
                    "id": entry.id,
                    "phone": record.phone,
                    "type": entry.entry_type,
                    "moderation": ModerationState::of(entry),
                }))
                .collect::<Vec<_>>(),
        });

        Ok(Reply::text(lines.join("\n")).with_data(data))
    }

    pub(super) fn approve(&self, sender: &Sender, args: &str) -> Result<Reply> {
        let entry_id = args.trim();
        if entry_id.is_empty() {
            return Ok(Reply::text(APPROVE_USAGE));
        }

        let outcome = self.store.approve(entry_id)?;
        let text = match &outcome {
            ApproveOutcome::Approved { phone } => {
                tracing::info!(
                    entry_id,
                    phone = %phone,
                    moderator = sender.id,
                    "entry approved"
                );
                format!("✅ Approved {}", entry_id)
            }
            ApproveOutcome::AlreadyApproved { .. } => {
                format!("Entry {} is already approved.", entry_id)
            }
            ApproveOutcome::NotFound => {
                tracing::debug!(entry_id, "approve_not_found");
                format!("Entry {} not found.", entry_id)
            }
        };

        Ok(Reply::text(text).with_data(json!({
            "entry_id": entry_id,
            "result": outcome,
            "changed": outcome.changed(),
        })))
    }

    pub(super) fn pending(&self) -> Result<Reply> {
        let pending = self.store.pending(PENDING_LIMIT)?;
        if pending.is_empty() {
            return Ok(Reply::text(NO_PENDING).with_data(json!({ "pending": [] })));
        }

        let lines: Vec<String> = pending
            .iter()
            .map(|(phone, entry)| {
                format!(
                    "{} | {} | {} | {}",
                    entry.id,
                    phone,
                    entry.entry_type.as_str().to_uppercase(),
                    truncate_chars(&entry.description, PENDING_PREVIEW_CHARS)
                )
            })
            .collect();

        let data = json!({
            "pending": pending
                .iter()
                .map(|(phone, entry)| json!({
                    "id": entry.id,
                    "phone": phone,
                    "type": entry.entry_type,
                    "description": entry.description,
                    "submitted_by": entry.submitted_by,
                }))
                .collect::<Vec<_>>(),
        });

        Ok(Reply::text(lines.join("\n")).with_data(data))
    }
}
