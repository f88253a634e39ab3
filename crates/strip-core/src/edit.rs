//! Single-replace edits produced by the interactive operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// The operation that produced an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// Markers inserted around a selection.
    Wrap,
    /// Line markers appended to selected lines.
    MarkLines,
    /// Markers removed from a selection.
    Erase,
    /// A block region rewritten onto one line.
    ConvertToInline,
}

/// One replacement of a byte range.
///
/// Every interactive command yields at most one of these so the host can
/// apply it atomically and keep a single undo step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// The kind of edit.
    pub kind: EditKind,
    /// Byte range replaced in the source.
    pub span: Range<usize>,
    /// Text previously in `span`.
    pub old_content: String,
    /// Text written in place of `span`.
    pub new_content: String,
}

impl Edit {
    pub fn new(kind: EditKind, source: &str, span: Range<usize>, new_content: String) -> Self {
        Self {
            kind,
            old_content: source[span.clone()].to_string(),
            span,
            new_content,
        }
    }

    /// Apply to `source`, which must be the text the edit was computed from.
    pub fn apply(&self, source: &str) -> String {
        let mut result = String::with_capacity(
            source.len() - self.span.len() + self.new_content.len(),
        );
        result.push_str(&source[..self.span.start]);
        result.push_str(&self.new_content);
        result.push_str(&source[self.span.end..]);
        result
    }

    /// Range covered by `new_content` after the edit is applied.
    pub fn new_span(&self) -> Range<usize> {
        self.span.start..self.span.start + self.new_content.len()
    }

    /// The edit that undoes this one.
    pub fn inverse(&self) -> Self {
        Self {
            kind: self.kind,
            span: self.new_span(),
            old_content: self.new_content.clone(),
            new_content: self.old_content.clone(),
        }
    }
}

/// Why an operation left the text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    EmptySelection,
    NotARemovalBlock,
    NoMarkersFound,
    AlreadyMarked,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySelection => f.write_str("Please select some code first"),
            Self::NotARemovalBlock => f.write_str("Selected text is not a removal block"),
            Self::NoMarkersFound => f.write_str("No removal markers found in the selection"),
            Self::AlreadyMarked => f.write_str("Selected lines are already marked"),
        }
    }
}

/// Result of an interactive operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied(Edit),
    Skipped(SkipReason),
}

impl EditOutcome {
    pub fn edit(&self) -> Option<&Edit> {
        match self {
            Self::Applied(edit) => Some(edit),
            Self::Skipped(_) => None,
        }
    }

    pub fn into_edit(self) -> Option<Edit> {
        match self {
            Self::Applied(edit) => Some(edit),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Applied(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_replaces_exactly_the_span() {
        let source = "fn(){ body }";
        let edit = Edit::new(EditKind::Wrap, source, 6..10, "/* X */ body /* Y */".to_string());
        assert_eq!(edit.old_content, "body");
        assert_eq!(edit.apply(source), "fn(){ /* X */ body /* Y */ }");
    }

    #[test]
    fn inverse_restores_the_source() {
        let source = "a\nb\nc\n";
        let edit = Edit::new(EditKind::Erase, source, 2..4, String::new());
        let edited = edit.apply(source);
        assert_eq!(edited, "a\nc\n");

        let inverse = edit.inverse();
        assert_eq!(inverse.span, 2..2);
        assert_eq!(inverse.apply(&edited), source);
    }

    #[test]
    fn skip_reasons_read_as_messages() {
        assert_eq!(SkipReason::EmptySelection.to_string(), "Please select some code first");
        assert_eq!(
            SkipReason::NotARemovalBlock.to_string(),
            "Selected text is not a removal block"
        );
    }
}
