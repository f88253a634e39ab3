//! Error types for strip-editor

use std::ops::Range;

/// Result type for strip-editor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in strip-editor operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] strip_core::Error),

    #[error("Unknown setting: {key}")]
    UnknownSetting { key: String },

    #[error("Invalid value `{value}` for {key}: {reason}")]
    InvalidSetting {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Edit at {span:?} no longer matches the document")]
    EditConflict { span: Range<usize> },

    #[error("Lines {start}:{end} are outside the document ({lines} lines)")]
    InvalidLineRange {
        start: usize,
        end: usize,
        lines: usize,
    },
}

impl Error {
    pub fn invalid_setting(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
