use postbox_types::{ConversationSummary, Message};
use tracing::{debug, info};

use crate::Postbox;
use crate::error::Result;

impl Postbox {
    /// Validate, apply the send policy, then persist. Nothing is written when
    /// any check fails.
    pub fn send_message(&self, sender: &str, recipient: &str, content: &str) -> Result<Message> {
        let message = Message::new(sender, recipient, content)?;
        self.policy.check(&message)?;

        self.store.append(&message)?;
        info!("Message sent from {} to {} at {}", sender, recipient, message.timestamp());
        Ok(message)
    }

    pub fn inbox(&self, username: &str, unread_only: bool) -> Result<Vec<Message>> {
        let messages = self.store.inbox(username, unread_only)?;
        debug!("Inbox for {}: {} messages (unread_only={})", username, messages.len(), unread_only);
        Ok(messages)
    }

    /// Mark the message to `recipient` stamped `timestamp` as read.
    /// Returns whether a message matched; a miss is not an error.
    pub fn read_message(&self, recipient: &str, timestamp: &str) -> Result<bool> {
        Ok(self.store.mark_read(recipient, timestamp)?)
    }

    pub fn conversation(&self, a: &str, b: &str) -> Result<Vec<Message>> {
        Ok(self.store.conversation(a, b)?)
    }

    pub fn conversations(&self, username: &str) -> Result<Vec<ConversationSummary>> {
        Ok(self.store.conversations(username)?)
    }
}
