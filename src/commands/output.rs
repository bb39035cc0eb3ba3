//! Reply printing

use crate::cli::{Cli, OutputFormat};
use numhist_core::bot::Reply;
use numhist_core::error::Result;

/// Print one reply. An ignored message prints nothing in human mode and
/// `null` in JSON mode.
pub fn print_reply(cli: &Cli, reply: Option<&Reply>) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&reply)?);
        }
        OutputFormat::Human => {
            if let Some(reply) = reply {
                println!("{}", reply.text);
            }
        }
    }
    Ok(())
}
