//! Command implementations for all numhist commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use numhist_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        dispatch_command::execute(self, ctx)
    }
}

pub(super) mod dispatch_command {
    use super::*;

    use crate::cli::{ChatArgs, UserArgs};
    use crate::commands::{bot, chat, config, send};
    use numhist_core::bail_invalid;
    use numhist_core::bot::BotCommand;
    use numhist_core::entry::EntryType;
    use std::path::PathBuf;

    pub(super) fn execute(cmd: &Commands, ctx: &CommandContext) -> Result<()> {
        match cmd {
            Commands::Start => bot::execute(ctx, &BotCommand::Start, &bot::anonymous()),
            Commands::AddHistory {
                number,
                entry_type,
                description,
                user,
            } => execute_add_history(ctx, number, *entry_type, description, user),
            Commands::History { number } => execute_history(ctx, number),
            Commands::MyUploads { user } => {
                bot::execute(ctx, &BotCommand::MyUploads, &user.sender())
            }
            Commands::Approve { id, user } => {
                bot::execute(ctx, &BotCommand::Approve(id.clone()), &user.sender())
            }
            Commands::Pending { user } => bot::execute(ctx, &BotCommand::Pending, &user.sender()),
            Commands::Send { text, chat } => execute_send(ctx, text, chat),
            Commands::Chat { chat } => chat::execute(ctx, chat),
            Commands::Config { write } => execute_config(ctx, write.as_ref()),
        }
    }

    fn execute_add_history(
        ctx: &CommandContext,
        number: &str,
        entry_type: EntryType,
        description: &str,
        user: &UserArgs,
    ) -> Result<()> {
        // The chat syntax is pipe-delimited, so a `|` here would silently cut
        // the value short
        if number.contains('|') {
            bail_invalid!("number (contains '|')", number);
        }
        if description.contains('|') {
            bail_invalid!("description (contains '|')", description);
        }
        let args = format!("{} | {} | {}", number, entry_type, description);
        bot::execute(ctx, &BotCommand::AddHistory(args), &user.sender())
    }

    fn execute_history(ctx: &CommandContext, number: &[String]) -> Result<()> {
        let command = BotCommand::History(number.join(" ").trim().to_string());
        bot::execute(ctx, &command, &bot::anonymous())
    }

    fn execute_send(ctx: &CommandContext, text: &str, chat: &ChatArgs) -> Result<()> {
        send::execute(ctx, text, chat)
    }

    fn execute_config(ctx: &CommandContext, write: Option<&PathBuf>) -> Result<()> {
        config::execute(ctx, write.map(PathBuf::as_path))
    }
}
