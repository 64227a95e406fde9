use thiserror::Error;

/// Top-level error type for the TrakShip backend.
///
/// Each variant wraps a subsystem-specific message. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// TrakshipError` so that the `?` operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrakshipError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for TrakshipError {
    fn from(err: toml::de::Error) -> Self {
        TrakshipError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TrakshipError {
    fn from(err: toml::ser::Error) -> Self {
        TrakshipError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TrakshipError {
    fn from(err: serde_json::Error) -> Self {
        TrakshipError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for TrakShip operations.
pub type Result<T> = std::result::Result<T, TrakshipError>;
