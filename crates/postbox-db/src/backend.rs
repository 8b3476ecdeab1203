use postbox_types::Message;

use crate::error::Result;

/// Where the message collection physically lives.
///
/// A backend only has to load and replace the whole ordered collection.
/// `append` and `mark_first_read` default to a full read-modify-write on top
/// of those two; backends with an index may override them, but must keep
/// append order and first-match semantics.
pub trait MessageBackend: Send {
    /// Create the empty collection if it does not exist yet. Idempotent.
    fn initialize(&mut self) -> Result<()>;

    /// Every record, in append order.
    fn load(&mut self) -> Result<Vec<Message>>;

    /// Swap the stored collection for `messages`. Readers must see either the
    /// old collection or the new one, never a mix.
    fn replace(&mut self, messages: &[Message]) -> Result<()>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    fn append(&mut self, message: &Message) -> Result<()> {
        let mut messages = self.load()?;
        messages.push(message.clone());
        self.replace(&messages)
    }

    /// Flag the first record addressed to `recipient` at exactly `timestamp`.
    /// Returns false, without writing, when nothing matches.
    fn mark_first_read(&mut self, recipient: &str, timestamp: &str) -> Result<bool> {
        let mut messages = self.load()?;
        let Some(hit) = messages
            .iter_mut()
            .find(|m| m.recipient() == recipient && m.timestamp() == timestamp)
        else {
            return Ok(false);
        };

        if !hit.is_read() {
            hit.mark_read();
            self.replace(&messages)?;
        }
        Ok(true)
    }
}
