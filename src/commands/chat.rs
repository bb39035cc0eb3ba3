//! Terminal chat transport
//!
//! Every stdin line is one inbound message from the configured user. Store
//! failures are logged and answered with the generic error reply; the
//! session keeps going. Lines that are not valid UTF-8 are decoded lossily.
//! Ctrl-C ends the session once the message in flight (if any) is answered.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use numhist_core::bot::{CommandHandler, Message, Reply, INTERNAL_ERROR_REPLY};
use numhist_core::error::{HistoryError, Result};
use numhist_core::trace_time;

use crate::cli::ChatArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::output::print_reply;

/// What the session loop reacts to
enum Input {
    Line(String),
    Eof,
    Interrupt,
}

pub fn execute(ctx: &CommandContext, args: &ChatArgs) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    let interrupt_tx = tx.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        let _ = interrupt_tx.send(Input::Interrupt);
    })
    .map_err(|e| HistoryError::FailedOperation {
        operation: "install Ctrl-C handler".to_string(),
        reason: e.to_string(),
    })?;

    let db = ctx.open_store()?;
    let handler = CommandHandler::new(&ctx.config, &db);
    let sender = args.user.sender();
    let chat = args.chat_kind();

    // Blocking reads happen off the session thread so an interrupt is seen
    // while waiting for input
    thread::spawn(move || read_stdin(tx));

    tracing::info!(user_id = sender.id, chat = ?chat, "chat session started");

    let mut handled = 0usize;
    for input in rx {
        let line = match input {
            Input::Line(line) => line,
            Input::Eof => break,
            Input::Interrupt => {
                tracing::info!("interrupted");
                break;
            }
        };
        if interrupted.load(Ordering::SeqCst) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let started = Instant::now();
        let message = Message::new(sender.clone(), chat, line);
        let reply = match handler.handle(&message) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, user_id = sender.id, "command failed");
                Some(Reply::text(INTERNAL_ERROR_REPLY))
            }
        };
        trace_time!(started, "chat_message");

        print_reply(ctx.cli, reply.as_ref())?;
        handled += 1;
    }

    tracing::info!(messages = handled, "chat session ended");
    Ok(())
}

fn read_stdin(tx: mpsc::Sender<Input>) {
    let mut stdin = io::stdin().lock();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match stdin.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = match String::from_utf8(buf.clone()) {
                    Ok(line) => line,
                    Err(_) => {
                        tracing::warn!("stdin line is not valid UTF-8, decoding lossily");
                        String::from_utf8_lossy(&buf).into_owned()
                    }
                };
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if tx.send(Input::Line(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                break;
            }
        }
    }
    let _ = tx.send(Input::Eof);
}
