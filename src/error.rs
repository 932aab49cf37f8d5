//! Error types for documentation runs.
//!
//! Only a handful of conditions abort a run: a bad scan root, an unusable
//! config file, and failing to write the artifacts. Everything the walker or
//! the collaborators run into degrades to a default value instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a documentation run.
#[derive(Debug, Error)]
pub enum ProjdocError {
    /// The scan root does not exist.
    #[error("Path not found: {path}")]
    RootNotFound { path: PathBuf },

    /// The scan root exists but is not a directory.
    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The config file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::Config`].
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An output artifact could not be written.
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The structured report could not be serialized.
    #[error("cannot serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ProjdocError {
    /// Create a write error with path context.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ProjdocError> = std::result::Result<T, E>;
