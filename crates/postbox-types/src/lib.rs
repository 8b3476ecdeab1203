//! Shared data model for postbox.
//!
//! The store, the facade, and the CLI all agree on the types in this crate.
//! Nothing here touches the filesystem.

pub mod error;
pub mod models;

pub use error::{FormatError, ValidationError};
pub use models::{ConversationSummary, Message, TIMESTAMP_FORMAT, User, now_timestamp};
