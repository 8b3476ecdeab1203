//! Command-line surface of the `postbox` binary.
//!
//! Every global flag can also come from the environment (or a `.env` file):
//! `POSTBOX_STORE_PATH`, `POSTBOX_BACKEND`, `POSTBOX_MAX_CONTENT_LEN`,
//! `POSTBOX_ALLOW_SELF`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use postbox_api::DEFAULT_MAX_CONTENT_LEN;
use postbox_db::DEFAULT_STORE_PATH;

#[derive(Parser, Debug)]
#[command(name = "postbox")]
#[command(about = "Postbox - a simple direct messaging system")]
#[command(version)]
pub struct Cli {
    /// Location of the message store
    #[arg(long, global = true, env = "POSTBOX_STORE_PATH", default_value = DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Storage backend for the message store
    #[arg(long, global = true, env = "POSTBOX_BACKEND", value_enum, default_value = "json")]
    pub backend: BackendKind,

    /// Longest accepted message, in characters (0 = no limit)
    #[arg(long, global = true, env = "POSTBOX_MAX_CONTENT_LEN", default_value_t = DEFAULT_MAX_CONTENT_LEN)]
    pub max_length: usize,

    /// Whether a user may send a message to themselves
    #[arg(long, global = true, env = "POSTBOX_ALLOW_SELF", default_value_t = true, action = ArgAction::Set)]
    pub allow_self: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// One JSON document holding every message
    Json,
    /// SQLite database, safe for several processes
    Sqlite,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Send a direct message
    Send {
        /// Username of sender
        sender: String,
        /// Username of recipient
        recipient: String,
        /// Message content
        message: String,
    },

    /// Read inbox
    Inbox {
        /// Username to check inbox for
        username: String,
        /// Show only unread messages
        #[arg(long)]
        unread: bool,
    },

    /// View conversation between two users
    Conversation {
        /// First user
        user1: String,
        /// Second user
        user2: String,
    },

    /// Mark a message as read
    MarkRead {
        /// Recipient username
        recipient: String,
        /// Message timestamp
        timestamp: String,
    },

    /// List everyone a user has exchanged messages with
    Conversations {
        /// Username to list conversations for
        username: String,
    },
}
