use postbox_db::StoreError;
use postbox_types::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("user '{0}' already exists")]
    UserExists(String),

    #[error("cannot send a message to yourself")]
    SelfMessage,
}
