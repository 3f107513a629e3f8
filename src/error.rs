use std::path::PathBuf;

use thiserror::Error;

/// Library error type for smart-display operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A mutation carried a malformed value (empty URL, zero duration,
    /// out-of-range index). The offending field is reported to the caller.
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The persisted playlist document exists but does not conform to the
    /// schema. Fatal at startup; never silently replaced with an empty list.
    #[error("corrupt playlist document at {path}: {message}")]
    CorruptConfig { path: PathBuf, message: String },

    /// A delete or jump-to target URL is not in the playlist.
    #[error("no slide with url {0:?}")]
    NotFound(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error on the persistence path.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }
}
