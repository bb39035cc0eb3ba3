use clap::Args;
use numhist_core::bot::{ChatKind, Sender};

/// Identity of the chat user a command runs as
#[derive(Args, Debug, Clone)]
pub struct UserArgs {
    /// Chat user id
    #[arg(long, env = "NUMHIST_USER_ID", allow_negative_numbers = true)]
    pub user_id: i64,

    /// Display name recorded with submissions
    #[arg(long, env = "NUMHIST_USER_NAME", default_value = "")]
    pub user_name: String,
}

impl UserArgs {
    pub fn sender(&self) -> Sender {
        Sender {
            id: self.user_id,
            name: self.user_name.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ChatArgs {
    #[command(flatten)]
    pub user: UserArgs,

    /// Treat messages as coming from a group chat
    #[arg(long)]
    pub group: bool,
}

impl ChatArgs {
    pub fn chat_kind(&self) -> ChatKind {
        if self.group {
            ChatKind::Group
        } else {
            ChatKind::Private
        }
    }
}
