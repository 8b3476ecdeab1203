use thiserror::Error;

/// Input rejected by a domain rule before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message content cannot be empty")]
    EmptyContent,

    /// Only raised by a send policy; `Message::new` has no length limit.
    #[error("message too long ({len} characters, max {max})")]
    ContentTooLong { len: usize, max: usize },
}

/// A persisted record could not be turned back into a [`crate::Message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("record is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("record is not a valid message: {0}")]
    Malformed(String),
}
