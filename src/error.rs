//! Error types for bitcache

use thiserror::Error;

/// Result type alias for bitcache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bitcache operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid format: {0}")]
    Format(String),

    #[error("Can't modify frozen {0}")]
    Immutable(&'static str),

    #[error("Index {index} is out of bounds (size {size})")]
    OutOfBounds { index: usize, size: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Incompatible filter sizes: expected {expected} bytes, found {found}")]
    IncompatibleSize { expected: usize, found: usize },

    #[error("Truncated input: expected {expected} bytes, found {found}")]
    TruncatedInput { expected: usize, found: usize },

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is a rejected mutation of a frozen value
    pub fn is_immutable(&self) -> bool {
        matches!(self, Error::Immutable(_))
    }
}
