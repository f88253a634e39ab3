//! Error types for strip-core

use crate::region::MarkerIssue;

/// Result type for strip-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in strip-core operations
///
/// "Nothing matched" is never an error. Scans that find no regions and edits
/// that have nothing to do come back as values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Marker `{key}` must not be empty")]
    EmptyMarker { key: String },

    #[error("Marker `{key}` is invalid: {reason}")]
    InvalidMarker { key: String, reason: String },

    #[error("Markers `{first}` and `{second}` both use the token `{token}`")]
    DuplicateMarker {
        token: String,
        first: String,
        second: String,
    },

    #[error("Invalid marker pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("{0}")]
    UnbalancedMarker(MarkerIssue),

    #[error("Selection {start}..{end} is outside the document (length {len})")]
    SelectionOutOfBounds { start: usize, end: usize, len: usize },
}

impl Error {
    pub fn empty_marker(key: impl Into<String>) -> Self {
        Self::EmptyMarker { key: key.into() }
    }

    pub fn invalid_marker(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidMarker {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error comes from configuration rather than document content
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyMarker { .. }
                | Self::InvalidMarker { .. }
                | Self::DuplicateMarker { .. }
                | Self::InvalidPattern(_)
        )
    }
}
