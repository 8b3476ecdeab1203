use std::collections::HashMap;

use chrono::Utc;
use postbox_types::User;
use tracing::info;

use crate::error::{ApiError, Result};

/// Process-local user table.
///
/// Never persisted and never consulted by the message store: a message may
/// name users that were never registered.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<String, User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, username: &str) -> Result<User> {
        if self.users.contains_key(username) {
            return Err(ApiError::UserExists(username.to_string()));
        }

        let user = User {
            username: username.to_string(),
            created_at: Utc::now(),
        };
        self.users.insert(username.to_string(), user.clone());

        info!("Registered user {}", username);
        Ok(user)
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Everyone except `username`, sorted by name.
    pub fn list_except(&self, username: &str) -> Vec<&User> {
        let mut others: Vec<&User> = self
            .users
            .values()
            .filter(|u| u.username != username)
            .collect();
        others.sort_by(|a, b| a.username.cmp(&b.username));
        others
    }
}
