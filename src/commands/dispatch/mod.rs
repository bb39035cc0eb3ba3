//! Command dispatch logic for numhist

use std::time::Instant;

use crate::cli::Cli;
use numhist_core::config::BotConfig;
use numhist_core::error::Result;
use tracing::debug;

mod command;
mod commands;
mod macros;

pub(crate) use command::CommandContext;
pub(crate) use macros::trace_command;

use command::{Command, NoCommand};

/// Resolve configuration: file and environment, then `--db` on top
pub fn resolve_config(cli: &Cli) -> Result<BotConfig> {
    let mut config = BotConfig::resolve(cli.config.as_deref())?;
    if let Some(db) = &cli.db {
        config.database = db.clone();
    }
    Ok(config)
}

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = resolve_config(cli)?;

    debug!(
        elapsed = ?start.elapsed(),
        database = %config.database.display(),
        moderators = config.moderators.len(),
        "resolve_config"
    );

    let ctx = CommandContext::new(cli, config, start);

    // Execute command
    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
