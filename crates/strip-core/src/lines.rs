//! Line-oriented helpers over byte offsets

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static LINE_BREAK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\r?\n\s*").expect("Invalid line break regex"));

pub(crate) fn is_horizontal_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Offset of the first byte of the line containing `offset`
pub fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |pos| pos + 1)
}

/// Offset of the `\n` ending the line containing `offset`, or the text length
pub fn line_end(text: &str, offset: usize) -> usize {
    text[offset..].find('\n').map_or(text.len(), |pos| offset + pos)
}

/// Step past a `\n` at `offset`, if there is one
pub fn past_line_break(text: &str, offset: usize) -> usize {
    if text[offset..].starts_with('\n') {
        offset + 1
    } else {
        offset
    }
}

/// Step back over a `\r` ending the line whose `\n` is at `line_end`
pub fn content_end(text: &str, line_end: usize) -> usize {
    if text[..line_end].ends_with('\r') && text[line_end..].starts_with('\n') {
        line_end - 1
    } else {
        line_end
    }
}

/// Step back over the line break ending just before `offset`, if there is one
pub fn before_line_break(text: &str, offset: usize) -> usize {
    let head = &text[..offset];
    if head.ends_with("\r\n") {
        offset - 2
    } else if head.ends_with('\n') {
        offset - 1
    } else {
        offset
    }
}

/// 1-based line number of `offset`
pub fn line_number(text: &str, offset: usize) -> usize {
    text[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}

/// Leading spaces and tabs of the line starting at `start`
pub fn indentation(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    let width = rest.len() - rest.trim_start_matches(is_horizontal_space).len();
    &rest[..width]
}

/// Whether `s` holds nothing but whitespace
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// The line ending the document already uses
pub fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Collapse every line break and the indentation after it into one space
pub fn collapse_line_breaks(text: &str) -> String {
    LINE_BREAK_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Reject selections that leave the text or split a character
pub fn check_selection(text: &str, selection: &Range<usize>) -> Result<()> {
    let in_bounds = selection.start <= selection.end && selection.end <= text.len();
    if !in_bounds
        || !text.is_char_boundary(selection.start)
        || !text.is_char_boundary(selection.end)
    {
        return Err(Error::SelectionOutOfBounds {
            start: selection.start,
            end: selection.end,
            len: text.len(),
        });
    }
    Ok(())
}

/// Collapse runs of two or more blank lines into a single empty line.
///
/// Lines holding only whitespace count as blank. Line endings are kept as
/// found, so CRLF input stays CRLF.
pub fn collapse_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < lines.len() {
        if !is_blank(lines[i]) {
            out.push_str(lines[i]);
            i += 1;
            continue;
        }

        let run_start = i;
        while i < lines.len() && is_blank(lines[i]) {
            i += 1;
        }

        if i - run_start == 1 {
            out.push_str(lines[run_start]);
        } else if lines[run_start].ends_with("\r\n") {
            out.push_str("\r\n");
        } else if lines[run_start].ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
