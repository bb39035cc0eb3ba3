//! Dispatch a single raw chat message

use numhist_core::bot::{CommandHandler, Message};
use numhist_core::error::Result;

use crate::cli::ChatArgs;
use crate::commands::dispatch::{trace_command, CommandContext};
use crate::commands::output::print_reply;

pub fn execute(ctx: &CommandContext, text: &str, args: &ChatArgs) -> Result<()> {
    let db = ctx.open_store()?;
    let handler = CommandHandler::new(&ctx.config, &db);

    let message = Message::new(args.user.sender(), args.chat_kind(), text);
    let reply = handler.handle(&message)?;
    trace_command!(ctx.cli, ctx.start, "handle_message");

    if reply.is_none() {
        tracing::debug!(user_id = args.user.user_id, "message ignored");
    }
    print_reply(ctx.cli, reply.as_ref())
}
