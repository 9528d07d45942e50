//! Store error types.
//!
//! Classified so callers can tell "the disk failed" from "the file is
//! there but unreadable" from "the input was rejected before I/O".

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the flat-file stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A filesystem read or write failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The answer CSV exists but could not be parsed.
    #[error("malformed answer log {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    /// A content key sanitized down to nothing.
    #[error("invalid content key: {0:?} has no filename-safe characters")]
    InvalidKey(String),
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
