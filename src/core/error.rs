//! Error types for the quest editor.
//!
//! `EditorError` is the closed set of failures any editor operation can
//! produce. The HTTP layer only ever looks at [`EditorError::kind`] to pick a
//! status code, so adding a variant means deciding which kind it belongs to.

use std::path::PathBuf;

use thiserror::Error;

use super::validation::ValidationError;

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Broad classification of an [`EditorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad filename, wrong body shape, failed schema validation.
    ClientInput,
    /// A required file does not exist.
    NotFound,
    /// A file exists but its content could not be parsed.
    Content,
    /// Anything else: I/O failures, serialization, worker panics.
    Internal,
}

#[derive(Error, Debug)]
pub enum EditorError {
    /// Requested filename could escape the data directory.
    #[error("Invalid file name")]
    InvalidFileName(String),

    /// Incoming payload was rejected before anything was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Query string or body could not be read off the request.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// A stored JSON document exists but does not parse.
    #[error("Invalid JSON: {source}")]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl EditorError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFileName(_) | Self::Validation(_) | Self::BadRequest(_) => {
                ErrorKind::ClientInput
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::MalformedJson { .. } => ErrorKind::Content,
            Self::Io(_) | Self::Serialize(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}
