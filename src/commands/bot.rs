//! One-shot chat commands run from the command line
//!
//! Each subcommand behaves like the matching chat command sent in a
//! private chat.

use numhist_core::bail_usage;
use numhist_core::bot::{BotCommand, ChatKind, CommandHandler, Sender};
use numhist_core::error::Result;

use crate::commands::dispatch::{trace_command, CommandContext};
use crate::commands::output::print_reply;

/// Sender for commands that do not depend on who asks
pub fn anonymous() -> Sender {
    Sender {
        id: 0,
        name: String::new(),
    }
}

pub fn execute(ctx: &CommandContext, command: &BotCommand, sender: &Sender) -> Result<()> {
    let db = ctx.open_store()?;
    let handler = CommandHandler::new(&ctx.config, &db);

    let reply = handler.execute(command, sender, ChatKind::Private)?;
    trace_command!(ctx.cli, ctx.start, "execute_command");

    match reply {
        Some(reply) => print_reply(ctx.cli, Some(&reply)),
        // Only moderator commands go unanswered in a private chat
        None => bail_usage!(format!(
            "/{} is restricted to moderators; user {} is not one",
            command.name(),
            sender.id
        )),
    }
}
