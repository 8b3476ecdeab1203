//! In-process API over the message store.
//!
//! [`Postbox`] is what a front end (the `postbox` CLI, or anything else)
//! talks to. It owns the store, applies the send policy, and keeps the
//! optional user registry alongside without tying the two together.

pub mod error;
pub mod messages;
pub mod policy;
pub mod registry;

use postbox_db::MessageStore;
use postbox_types::User;

pub use error::{ApiError, Result};
pub use policy::{DEFAULT_MAX_CONTENT_LEN, SendPolicy};
pub use registry::UserRegistry;

pub struct Postbox {
    store: MessageStore,
    users: UserRegistry,
    policy: SendPolicy,
}

impl Postbox {
    pub fn new(store: MessageStore) -> Self {
        Self::with_policy(store, SendPolicy::default())
    }

    pub fn with_policy(store: MessageStore, policy: SendPolicy) -> Self {
        Self {
            store,
            users: UserRegistry::new(),
            policy,
        }
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    pub fn register_user(&mut self, username: &str) -> Result<User> {
        self.users.register(username)
    }
}
