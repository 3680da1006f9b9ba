//! Centralized error types for mailpane.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mailpane library.
///
/// View-model construction itself never fails with an error: a malformed
/// attachment record yields `None`. These variants cover the host side
/// (reading input files, parsing URLs, talking to the server).
#[derive(Error, Debug)]
pub enum ViewError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The file is not valid JSON.
    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A configured URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The remote endpoint could not be reached or answered badly.
    #[error("Remote call failed: {0}")]
    Remote(String),
}

/// Convenience alias for `Result<T, ViewError>`.
pub type Result<T> = std::result::Result<T, ViewError>;

impl ViewError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a `Json` variant from a path and a `serde_json::Error`.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

impl From<url::ParseError> for ViewError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}
