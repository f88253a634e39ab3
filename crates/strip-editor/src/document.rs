//! An open document with a current selection

use similar::TextDiff;
use std::ops::Range;
use strip_core::Edit;
use strip_core::lines::check_selection;

use crate::error::{Error, Result};

/// Text being edited, the selection inside it, and an undo history.
///
/// Every command changes the text through [`Document::apply`], exactly once,
/// so one command is one undo step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Text as first opened, for modification tracking and diffs
    original: String,
    text: String,
    selection: Range<usize>,
    version: u64,
    undo_stack: Vec<Edit>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            original: text.clone(),
            text,
            selection: 0..0,
            version: 0,
            undo_stack: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn selected_text(&self) -> &str {
        &self.text[self.selection.clone()]
    }

    /// Incremented by every applied edit
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_modified(&self) -> bool {
        self.text != self.original
    }

    /// Select a byte range
    pub fn select(&mut self, range: Range<usize>) -> Result<()> {
        check_selection(&self.text, &range)?;
        self.selection = range;
        Ok(())
    }

    /// Select whole lines `start..=end` (1-based), including the final line
    /// break if there is one.
    pub fn select_lines(&mut self, start: usize, end: usize) -> Result<()> {
        let starts: Vec<usize> = std::iter::once(0)
            .chain(self.text.match_indices('\n').map(|(i, _)| i + 1))
            .filter(|&offset| offset < self.text.len() || offset == 0)
            .collect();
        let lines = starts.len();

        if start == 0 || start > end || end > lines {
            return Err(Error::InvalidLineRange { start, end, lines });
        }

        let from = starts[start - 1];
        let to = starts.get(end).copied().unwrap_or(self.text.len());
        self.selection = from..to;
        Ok(())
    }

    /// Apply one edit computed against the current text.
    ///
    /// The edit is rejected if the text under its span has changed since it
    /// was computed. On success the selection covers the inserted text.
    pub fn apply(&mut self, edit: &Edit) -> Result<()> {
        let current = self.text.get(edit.span.clone());
        if current != Some(edit.old_content.as_str()) {
            return Err(Error::EditConflict {
                span: edit.span.clone(),
            });
        }

        self.text = edit.apply(&self.text);
        self.selection = edit.new_span();
        self.version += 1;
        self.undo_stack.push(edit.clone());
        Ok(())
    }

    /// Revert the most recent edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(edit) = self.undo_stack.pop() else {
            return Ok(false);
        };
        let inverse = edit.inverse();
        if self.text.get(inverse.span.clone()) != Some(inverse.old_content.as_str()) {
            return Err(Error::EditConflict { span: inverse.span });
        }
        self.text = inverse.apply(&self.text);
        self.selection = edit.span.clone();
        self.version += 1;
        Ok(true)
    }

    /// Unified diff from the opened text to the current text
    pub fn diff(&self, label: &str) -> String {
        TextDiff::from_lines(&self.original, &self.text)
            .unified_diff()
            .context_radius(3)
            .header(&format!("a/{label}"), &format!("b/{label}"))
            .to_string()
    }
}
