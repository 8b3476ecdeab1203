use std::path::PathBuf;

use postbox_api::{Postbox, SendPolicy};
use postbox_db::{MessageStore, Result};
use tracing::debug;

use crate::args::{BackendKind, Cli};

/// Resolved runtime settings, after flags, environment and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_path: PathBuf,
    pub backend: BackendKind,
    pub policy: SendPolicy,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            store_path: cli.store.clone(),
            backend: cli.backend,
            policy: SendPolicy {
                max_content_len: (cli.max_length > 0).then_some(cli.max_length),
                allow_self_messages: cli.allow_self,
            },
        }
    }

    pub fn open(&self) -> Result<Postbox> {
        debug!("Opening {:?} store at {}", self.backend, self.store_path.display());
        let store = match self.backend {
            BackendKind::Json => MessageStore::open_json(&self.store_path)?,
            BackendKind::Sqlite => MessageStore::open_sqlite(&self.store_path)?,
        };
        Ok(Postbox::with_policy(store, self.policy.clone()))
    }
}
