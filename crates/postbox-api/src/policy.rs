use postbox_types::{Message, ValidationError};

use crate::error::{ApiError, Result};

/// Default ceiling on message length, in characters.
pub const DEFAULT_MAX_CONTENT_LEN: usize = 1000;

/// Extra rules applied on send, on top of the model's own validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendPolicy {
    /// `None` disables the length check.
    pub max_content_len: Option<usize>,
    pub allow_self_messages: bool,
}

impl Default for SendPolicy {
    fn default() -> Self {
        Self {
            max_content_len: Some(DEFAULT_MAX_CONTENT_LEN),
            allow_self_messages: true,
        }
    }
}

impl SendPolicy {
    /// No limits beyond non-empty content.
    pub fn permissive() -> Self {
        Self {
            max_content_len: None,
            allow_self_messages: true,
        }
    }

    pub fn check(&self, message: &Message) -> Result<()> {
        if let Some(max) = self.max_content_len {
            let len = message.content().chars().count();
            if len > max {
                return Err(ValidationError::ContentTooLong { len, max }.into());
            }
        }

        if !self.allow_self_messages && message.sender() == message.recipient() {
            return Err(ApiError::SelfMessage);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(from: &str, to: &str, content: &str) -> Message {
        Message::new(from, to, content).unwrap()
    }

    #[test]
    fn default_allows_up_to_limit() {
        let policy = SendPolicy::default();
        let at_limit = "x".repeat(DEFAULT_MAX_CONTENT_LEN);
        assert!(policy.check(&msg("alice", "bob", &at_limit)).is_ok());

        let over = "x".repeat(DEFAULT_MAX_CONTENT_LEN + 1);
        assert!(matches!(
            policy.check(&msg("alice", "bob", &over)),
            Err(ApiError::Validation(ValidationError::ContentTooLong { len: 1001, max: 1000 }))
        ));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let policy = SendPolicy {
            max_content_len: Some(3),
            ..SendPolicy::default()
        };
        assert!(policy.check(&msg("alice", "bob", "héé")).is_ok());
    }

    #[test]
    fn self_messages_follow_flag() {
        let note = msg("alice", "alice", "note to self");
        assert!(SendPolicy::default().check(&note).is_ok());

        let strict = SendPolicy {
            allow_self_messages: false,
            ..SendPolicy::default()
        };
        assert!(matches!(strict.check(&note), Err(ApiError::SelfMessage)));
    }

    #[test]
    fn permissive_has_no_length_limit() {
        let long = "y".repeat(50_000);
        assert!(SendPolicy::permissive().check(&msg("a", "b", &long)).is_ok());
    }
}
