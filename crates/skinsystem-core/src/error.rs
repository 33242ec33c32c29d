//! Error types for the skin system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Lookup misses
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Cape not found: {0}")]
    CapeNotFound(String),

    // Configuration errors
    #[error("Required parameter not provided: {0}")]
    ParamRequired(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    // Record format errors
    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Compression error: {0}")]
    Compression(String),

    // Infrastructure errors
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error is an expected miss that callers answer with a default.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ProfileNotFound(_) | Error::CapeNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
