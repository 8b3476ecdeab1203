use std::path::PathBuf;

use postbox_types::FormatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failures are passed through untouched.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("message document {} is not a JSON array of records: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("message record #{index} is unreadable: {source}")]
    Format {
        index: usize,
        #[source]
        source: FormatError,
    },

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("message store lock poisoned")]
    Poisoned,
}
