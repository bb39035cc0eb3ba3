//! Numhist - moderated phone number history bot
//!
//! Users submit call/message/note history for phone numbers; moderators
//! approve entries before anyone else can see them.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use numhist_core::error::{ExitCode as HistoryExitCode, HistoryError};
use numhist_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return argument_error(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => exit(HistoryExitCode::Success),
        Err(e) => report(&e, cli.format, cli.quiet),
    }
}

/// Clap failed before `--format` was available. Scripts asking for JSON
/// still get the error envelope; everyone else gets clap's own output.
fn argument_error(err: clap::Error) -> ExitCode {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
        || !wants_json(env::args().skip(1))
    {
        err.exit();
    }

    let error = HistoryError::UsageError(err.to_string().trim_end().to_string());
    report(&error, OutputFormat::Json, false)
}

fn report(error: &HistoryError, format: OutputFormat, quiet: bool) -> ExitCode {
    match format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if !quiet => eprintln!("error: {}", error),
        OutputFormat::Human => {}
    }
    exit(error.exit_code())
}

fn exit(code: HistoryExitCode) -> ExitCode {
    ExitCode::from(code as u8)
}

/// Whether raw arguments select `--format json`, in either spelling
fn wants_json(args: impl Iterator<Item = String>) -> bool {
    let args: Vec<String> = args.collect();
    args.iter().any(|a| a == "--format=json")
        || args
            .windows(2)
            .any(|pair| pair[0] == "--format" && pair[1] == "json")
}
