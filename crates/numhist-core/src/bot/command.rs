//! Slash-command parsing

/// A recognised chat command with its raw argument text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    AddHistory(String),
    History(String),
    MyUploads,
    Approve(String),
    Pending,
}

impl BotCommand {
    /// Parse a message text. Returns `None` for plain text and unknown
    /// commands.
    ///
    /// The command word is case-insensitive and may carry a `@botname`
    /// suffix. Everything after the first whitespace is the argument text,
    /// trimmed.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_start();
        let rest = text.strip_prefix('/')?;

        let (word, args) = match rest.find(char::is_whitespace) {
            Some(idx) => (&rest[..idx], rest[idx..].trim()),
            None => (rest, ""),
        };
        let name = word.split('@').next().unwrap_or(word).to_lowercase();
        let args = args.to_string();

        match name.as_str() {
            "start" => Some(BotCommand::Start),
            "help" => Some(BotCommand::Help),
            "addhistory" => Some(BotCommand::AddHistory(args)),
            "history" => Some(BotCommand::History(args)),
            "myuploads" => Some(BotCommand::MyUploads),
            "approve" => Some(BotCommand::Approve(args)),
            "pending" => Some(BotCommand::Pending),
            _ => None,
        }
    }

    /// Command name as typed, without the slash
    pub fn name(&self) -> &'static str {
        match self {
            BotCommand::Start => "start",
            BotCommand::Help => "help",
            BotCommand::AddHistory(_) => "addhistory",
            BotCommand::History(_) => "history",
            BotCommand::MyUploads => "myuploads",
            BotCommand::Approve(_) => "approve",
            BotCommand::Pending => "pending",
        }
    }
}

/// Split `/addhistory` arguments on `|`, trimming each segment
pub fn split_pipe_args(args: &str) -> Vec<&str> {
    args.split('|').map(str::trim).collect()
}
