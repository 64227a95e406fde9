//! Error types for the chatbot.

use trakship_core::error::TrakshipError;

/// Errors from the response engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("session id cannot be empty")]
    EmptySessionId,
    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<TrakshipError> for ChatError {
    fn from(err: TrakshipError) -> Self {
        ChatError::StorageError(err.to_string())
    }
}
