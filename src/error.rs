//! Error types for the Slack convenience layer

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by clients, façades and entities.
#[derive(Error, Debug)]
pub enum Error {
    /// The API answered with a falsy `ok`.
    #[error("API call failed: {error}")]
    ApiFailed {
        /// The `error` field of the response
        error: String,
    },

    /// Lookup by an unknown name or id.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// `users.conversations` reported further pages, which are not fetched.
    #[error("more result pages exist but pagination is not supported: {metadata}")]
    PaginationUnsupported { metadata: serde_json::Value },

    /// A response or record lacked a required field.
    #[error("missing or malformed field: {field}")]
    MissingField { field: String },

    #[error("{} is not a directory", path.display())]
    CacheDirNotADirectory { path: PathBuf },

    #[error("failed to read cache file {}", path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write cache file {}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cache file {}", path.display())]
    CacheParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// History pagination was cancelled by the caller.
    #[error("operation cancelled")]
    Cancelled,

    /// Failure raised by the transport, passed through untouched.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Error::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            key: key.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
