//! Command trait and context for dispatching commands

use std::time::Instant;

use crate::cli::Cli;
use numhist_core::config::BotConfig;
use numhist_core::db::Database;
use numhist_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: BotConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: BotConfig, start: Instant) -> Self {
        Self { cli, config, start }
    }

    /// Open (creating if needed) the configured history database
    pub fn open_store(&self) -> Result<Database> {
        let db = Database::open(&self.config.database)?;
        super::trace_command!(self.cli, self.start, "open_store");
        Ok(db)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("numhist {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("A moderated phone number history bot.");
        println!();
        println!("Run `numhist --help` for usage information.");
        Ok(())
    }
}
