//! Show the resolved configuration

use std::path::Path;

use numhist_core::error::Result;

use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;

pub fn execute(ctx: &CommandContext, write: Option<&Path>) -> Result<()> {
    if let Some(path) = write {
        ctx.config.save(path)?;
        tracing::info!(path = %path.display(), "configuration written");
    }

    let shown = ctx.config.redacted();
    match ctx.cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        OutputFormat::Human => {
            print!("{}", shown.to_toml()?);
            if let Some(path) = write {
                if !ctx.cli.quiet {
                    eprintln!("Wrote {}", path.display());
                }
            }
        }
    }
    Ok(())
}
