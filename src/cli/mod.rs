//! CLI argument parsing for numhist
//!
//! Supports global flags: --db, --config, --format, --quiet, --verbose

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use numhist_core::entry::EntryType;
pub use args::{ChatArgs, UserArgs};
pub use numhist_core::format::OutputFormat;
use parse::{parse_entry_type, parse_output_format};

/// Numhist - moderated phone number history bot
#[derive(Parser, Debug)]
#[command(name = "numhist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database path (overrides the configured path)
    #[arg(long, global = true, env = "HISTORY_DB")]
    pub db: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true, env = "NUMHIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the bot help text
    Start,

    /// Submit a history entry for moderation
    AddHistory {
        /// Phone number in any common notation
        number: String,

        /// Entry type (call, message, note, business, spam-report)
        #[arg(value_parser = parse_entry_type)]
        entry_type: EntryType,

        /// What happened
        description: String,

        #[command(flatten)]
        user: UserArgs,
    },

    /// Show approved history for a number
    History {
        /// Phone number; separate words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        number: Vec<String>,
    },

    /// List your own submissions and their moderation state
    MyUploads {
        #[command(flatten)]
        user: UserArgs,
    },

    /// Approve a pending entry (moderators only)
    Approve {
        /// Entry ID
        id: String,

        #[command(flatten)]
        user: UserArgs,
    },

    /// List entries awaiting moderation (moderators only)
    Pending {
        #[command(flatten)]
        user: UserArgs,
    },

    /// Dispatch one raw chat message and print the reply
    Send {
        /// Message text, e.g. "/history 9876543210"
        text: String,

        #[command(flatten)]
        chat: ChatArgs,
    },

    /// Terminal chat session: one message per stdin line
    Chat {
        #[command(flatten)]
        chat: ChatArgs,
    },

    /// Print the resolved configuration
    Config {
        /// Also write it to this TOML file (token included)
        #[arg(long)]
        write: Option<PathBuf>,
    },
}
