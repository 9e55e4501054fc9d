//! Error types for natsume-core

use std::path::PathBuf;

/// Result type alias for natsume-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Session and configuration errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Attempt to store a blank credential
    #[error("Refusing to store an empty token")]
    EmptyToken,

    /// Token contains bytes that cannot travel in a request header
    #[error("Token contains control characters (a trailing newline?)")]
    InvalidToken,

    /// Persisted session document could not be decoded
    #[error("Corrupt session file {path}: {reason}")]
    CorruptSession {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file could not be parsed
    #[error("Invalid config file {path}: {reason}")]
    Config {
        path: PathBuf,
        reason: String,
    },

    /// Configuration value out of range
    #[error("Invalid config value: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if the error came from durable storage rather than input
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Io(_) | Self::CorruptSession { .. })
    }
}
