//! Chat command handling
//!
//! Transport-agnostic: a transport turns whatever it receives into a
//! [`Message`], calls [`CommandHandler::handle`], and delivers the returned
//! [`Reply`] (if any) back to the chat.
//!
//! Commands restricted to private chats or to moderators produce no reply at
//! all when those conditions are not met, the same as a transport-level
//! filter dropping the message.

mod command;
mod handlers;

use serde::Serialize;

use crate::config::BotConfig;
use crate::db::HistoryStore;
use crate::error::Result;

pub use command::{split_pipe_args, BotCommand};

/// Shown to chat users when a store operation fails
pub const INTERNAL_ERROR_REPLY: &str = "⚠️ Something went wrong, please try again later.";

/// Kind of chat a message arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    /// One-to-one chat with the bot
    #[default]
    Private,
    /// Group or channel
    Group,
}

/// The user who sent a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sender {
    pub id: i64,
    /// Display name, may be empty
    pub name: String,
}

/// An inbound chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub chat: ChatKind,
    pub text: String,
}

impl Message {
    pub fn new(sender: Sender, chat: ChatKind, text: impl Into<String>) -> Self {
        Self {
            sender,
            chat,
            text: text.into(),
        }
    }
}

/// Outbound reply text, plus structured data for JSON consumers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    #[serde(rename = "reply")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Maps inbound messages to store operations and reply text
pub struct CommandHandler<'a, S: HistoryStore> {
    config: &'a BotConfig,
    store: &'a S,
}

impl<'a, S: HistoryStore> CommandHandler<'a, S> {
    pub fn new(config: &'a BotConfig, store: &'a S) -> Self {
        Self { config, store }
    }

    /// Handle one message. `Ok(None)` means the message is ignored.
    pub fn handle(&self, message: &Message) -> Result<Option<Reply>> {
        let Some(command) = BotCommand::parse(&message.text) else {
            return Ok(None);
        };
        self.execute(&command, &message.sender, message.chat)
    }

    /// Run an already-parsed command
    pub fn execute(
        &self,
        command: &BotCommand,
        sender: &Sender,
        chat: ChatKind,
    ) -> Result<Option<Reply>> {
        tracing::debug!(
            command = command.name(),
            user_id = sender.id,
            chat = ?chat,
            "handle_command"
        );

        let private = chat == ChatKind::Private;
        let moderator = self.config.is_moderator(sender.id);

        match command {
            BotCommand::Start | BotCommand::Help if private => Ok(Some(handlers::start())),
            BotCommand::AddHistory(args) if private => {
                self.add_history(sender, args).map(Some)
            }
            BotCommand::History(args) => self.history(args).map(Some),
            BotCommand::MyUploads if private => self.my_uploads(sender).map(Some),
            BotCommand::Approve(args) if moderator => self.approve(sender, args).map(Some),
            BotCommand::Pending if moderator => self.pending().map(Some),
            BotCommand::Approve(_) | BotCommand::Pending => {
                tracing::warn!(
                    user_id = sender.id,
                    command = command.name(),
                    "moderator command from unauthorized user ignored"
                );
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}
