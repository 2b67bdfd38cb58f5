//! Error types for content loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while resolving and reading a cheatsheet
#[derive(Debug, Error)]
pub enum Error {
    /// No source file exists for the slug
    #[error("cheatsheet not found: {0}")]
    NotFound(String),

    /// The slug cannot name a file inside the content directory
    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    /// The source file exists but could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this error means the document does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::InvalidSlug(_))
    }
}
