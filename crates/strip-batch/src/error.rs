//! Error types for strip-batch

use std::path::PathBuf;

/// Result type for strip-batch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in strip-batch operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration rejected by strip-core
    #[error(transparent)]
    Core(#[from] strip_core::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid glob pattern `{pattern}`: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    /// A single file could not be transformed
    #[error("Failed to transform {path}: {source}")]
    Transform {
        path: PathBuf,
        #[source]
        source: strip_core::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
