use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FormatError, ValidationError};

/// Layout of generated timestamps. Fixed width, so comparing two of them as
/// plain strings gives the same answer as comparing them as instants.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current UTC time rendered with [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// A single direct message.
///
/// Everything except `read` is fixed at construction. `read` only ever moves
/// from false to true through [`Message::mark_read`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Message {
    sender: String,
    recipient: String,
    content: String,
    timestamp: String,
    read: bool,
}

impl Message {
    /// Build a message stamped with the current time.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::with_timestamp(sender, recipient, content, now_timestamp())
    }

    /// Build a message with a caller-supplied timestamp.
    pub fn with_timestamp(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        Ok(Self {
            sender: sender.into(),
            recipient: recipient.into(),
            content,
            timestamp: timestamp.into(),
            read: false,
        })
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }

    /// True when this message travels between `a` and `b`, in either direction.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.sender == a && self.recipient == b) || (self.sender == b && self.recipient == a)
    }

    /// The other party of this message as seen by `user`, if `user` took part in it.
    pub fn partner_of(&self, user: &str) -> Option<&str> {
        if self.sender == user {
            Some(&self.recipient)
        } else if self.recipient == user {
            Some(&self.sender)
        } else {
            None
        }
    }

    /// Field-for-field storage record.
    pub fn to_record(&self) -> serde_json::Value {
        serde_json::json!({
            "sender": self.sender,
            "recipient": self.recipient,
            "content": self.content,
            "timestamp": self.timestamp,
            "read": self.read,
        })
    }

    /// Inverse of [`Message::to_record`]. `read` may be absent in records
    /// written before the flag existed.
    pub fn from_record(record: serde_json::Value) -> Result<Self, FormatError> {
        let raw: RawRecord =
            serde_json::from_value(record).map_err(|e| FormatError::Malformed(e.to_string()))?;
        Self::try_from(raw)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message(from={}, to={}, at={})",
            self.sender, self.recipient, self.timestamp
        )
    }
}

/// On-disk shape before required fields are checked.
/// Unknown fields are ignored.
#[derive(Deserialize)]
struct RawRecord {
    sender: Option<String>,
    recipient: Option<String>,
    content: Option<String>,
    timestamp: Option<String>,
    read: Option<bool>,
}

impl TryFrom<RawRecord> for Message {
    type Error = FormatError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            sender: raw.sender.ok_or(FormatError::MissingField("sender"))?,
            recipient: raw.recipient.ok_or(FormatError::MissingField("recipient"))?,
            content: raw.content.ok_or(FormatError::MissingField("content"))?,
            timestamp: raw.timestamp.ok_or(FormatError::MissingField("timestamp"))?,
            read: raw.read.unwrap_or(false),
        })
    }
}

/// Registry entry. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// One row of a user's conversation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    pub partner: String,
    /// Most recent message exchanged with `partner`, in either direction.
    pub last_message: Message,
    /// Unread messages the user received from `partner`.
    pub unread: usize,
}
