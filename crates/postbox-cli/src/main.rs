mod args;
mod config;
mod render;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing::debug;

use postbox_api::Postbox;

use crate::args::{Cli, Commands};
use crate::config::Settings;

const DEFAULT_LOG_FILTER: &str = "postbox=warn,postbox_api=warn,postbox_db=warn";

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = Settings::from_cli(&cli);
    let postbox = settings
        .open()
        .with_context(|| format!("cannot open message store {}", settings.store_path.display()))?;

    print!("{}", run(&postbox, command)?);
    Ok(())
}

/// Execute one subcommand and return what should be printed.
fn run(postbox: &Postbox, command: Commands) -> anyhow::Result<String> {
    debug!("Running {:?}", command);

    let output = match command {
        Commands::Send {
            sender,
            recipient,
            message,
        } => render::sent(&postbox.send_message(&sender, &recipient, &message)?),
        Commands::Inbox { username, unread } => {
            render::inbox(&username, &postbox.inbox(&username, unread)?, unread)
        }
        Commands::Conversation { user1, user2 } => {
            render::conversation(&user1, &user2, &postbox.conversation(&user1, &user2)?)
        }
        Commands::MarkRead {
            recipient,
            timestamp,
        } => render::mark_read(postbox.read_message(&recipient, &timestamp)?),
        Commands::Conversations { username } => {
            render::conversations(&username, &postbox.conversations(&username)?)
        }
    };

    Ok(output)
}
