//! Marker insertion around a selected span

use std::ops::Range;

use crate::config::{CommentStyle, FormattingOptions, MarkerSet};
use crate::edit::{Edit, EditKind, EditOutcome, SkipReason};
use crate::error::Result;
use crate::lines::{
    check_selection, collapse_line_breaks, indentation, is_blank, is_horizontal_space, line_end,
    line_ending, line_start,
};
use crate::pattern::MarkerPatterns;

/// How to wrap a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapRequest {
    /// Comment syntax for block mode. Inline mode always uses block comments.
    pub style: CommentStyle,
    /// Put markers and selection on a single line
    pub inline: bool,
}

impl WrapRequest {
    pub fn block(style: CommentStyle) -> Self {
        Self {
            style,
            inline: false,
        }
    }

    pub fn inline() -> Self {
        Self {
            style: CommentStyle::Block,
            inline: true,
        }
    }
}

/// Wrap `selection` in a start/end marker pair.
///
/// An empty or whitespace-only selection is skipped rather than producing an
/// empty region.
pub fn wrap(
    text: &str,
    selection: Range<usize>,
    markers: &MarkerSet,
    request: WrapRequest,
    formatting: &FormattingOptions,
) -> Result<EditOutcome> {
    check_selection(text, &selection)?;
    if is_blank(&text[selection.clone()]) {
        return Ok(EditOutcome::Skipped(SkipReason::EmptySelection));
    }

    let edit = if request.inline {
        wrap_inline(text, selection, markers, formatting)
    } else {
        wrap_block(text, selection, markers, request.style, formatting)
    };
    Ok(EditOutcome::Applied(edit))
}

fn wrap_inline(
    text: &str,
    selection: Range<usize>,
    markers: &MarkerSet,
    formatting: &FormattingOptions,
) -> Edit {
    let open = CommentStyle::Block.render(&markers.block_start, formatting.use_spacing);
    let close = CommentStyle::Block.render(&markers.block_end, formatting.use_spacing);
    let body = collapse_line_breaks(&text[selection.clone()]);
    Edit::new(
        EditKind::Wrap,
        text,
        selection,
        format!("{open} {body} {close}"),
    )
}

fn wrap_block(
    text: &str,
    selection: Range<usize>,
    markers: &MarkerSet,
    style: CommentStyle,
    formatting: &FormattingOptions,
) -> Edit {
    let (start_token, end_token) = style.pair(markers);
    let open = style.render(start_token, formatting.use_spacing);
    let close = style.render(end_token, formatting.use_spacing);
    let nl = line_ending(text);

    let first_line = line_start(text, selection.start);
    let indent = if formatting.preserve_indentation {
        indentation(text, first_line)
    } else {
        ""
    };

    // Code before the selection on its first line keeps its own line
    let code_before = !is_blank(&text[first_line..selection.start]);
    let start = if code_before {
        text[..selection.start]
            .trim_end_matches(is_horizontal_space)
            .len()
    } else {
        first_line
    };

    let selected = &text[selection.clone()];
    let (body, ends_with_break) = match selected.strip_suffix('\n') {
        Some(b) => (b.strip_suffix('\r').unwrap_or(b), true),
        None => (selected, false),
    };

    // Code after the selection on its last line moves below the end marker
    let code_after =
        !ends_with_break && !is_blank(&text[selection.end..line_end(text, selection.end)]);
    let end = if code_after {
        let rest = &text[selection.end..];
        selection.end + (rest.len() - rest.trim_start_matches(is_horizontal_space).len())
    } else {
        selection.end
    };

    let mut out = String::new();
    if code_before {
        out.push_str(nl);
    }
    if formatting.add_empty_lines {
        out.push_str(nl);
    }
    out.push_str(indent);
    out.push_str(&open);
    out.push_str(nl);
    if code_before {
        out.push_str(indent);
    } else {
        out.push_str(&text[first_line..selection.start]);
    }
    out.push_str(body);
    out.push_str(nl);
    out.push_str(indent);
    out.push_str(&close);
    if ends_with_break || code_after {
        out.push_str(nl);
    }
    if formatting.add_empty_lines {
        out.push_str(nl);
    }
    if code_after {
        out.push_str(indent);
    }

    Edit::new(EditKind::Wrap, text, start..end, out)
}

/// Append the single-line marker to every line the selection touches.
///
/// With an empty selection the caret's line is marked. Blank lines and lines
/// that already carry the marker are left alone.
pub fn mark_lines(
    text: &str,
    selection: Range<usize>,
    markers: &MarkerSet,
    formatting: &FormattingOptions,
) -> Result<EditOutcome> {
    check_selection(text, &selection)?;
    let patterns = MarkerPatterns::compile(markers)?;
    let comment = CommentStyle::Line.render(&markers.line_marker, formatting.use_spacing);

    // A selection ending at column zero does not touch that line
    let last = if selection.end > selection.start && text[..selection.end].ends_with('\n') {
        selection.end - 1
    } else {
        selection.end
    };
    let span = line_start(text, selection.start)..line_end(text, last);

    let marked: Vec<String> = text[span.clone()]
        .split('\n')
        .map(|line| {
            let (content, cr) = match line.strip_suffix('\r') {
                Some(content) => (content, "\r"),
                None => (line, ""),
            };
            if is_blank(content) || patterns.line_marker.is_match(content) {
                line.to_string()
            } else {
                format!("{} {comment}{cr}", content.trim_end())
            }
        })
        .collect();
    let new_content = marked.join("\n");

    if new_content == text[span.clone()] {
        let reason = if is_blank(&text[span]) {
            SkipReason::EmptySelection
        } else {
            SkipReason::AlreadyMarked
        };
        return Ok(EditOutcome::Skipped(reason));
    }
    Ok(EditOutcome::Applied(Edit::new(
        EditKind::MarkLines,
        text,
        span,
        new_content,
    )))
}
