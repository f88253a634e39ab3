//! Marker removal and block-to-inline conversion over a selected span

use regex::{Captures, Regex};
use std::ops::Range;
use tracing::debug;

use crate::config::{CommentStyle, MarkerConfig};
use crate::edit::{Edit, EditKind, EditOutcome, SkipReason};
use crate::error::Result;
use crate::lines::{check_selection, collapse_line_breaks, is_blank, is_horizontal_space};
use crate::pattern::{alternation, block_comment, line_comment, token_fragment};

/// Strip every marker comment naming a token from `catalogue` out of the
/// selection, keeping the code it surrounded.
///
/// Lines that become blank are dropped. A line that loses a trailing comment
/// is trimmed at the end; its indentation stays.
pub fn erase(text: &str, selection: Range<usize>, catalogue: &[String]) -> Result<EditOutcome> {
    check_selection(text, &selection)?;
    if is_blank(&text[selection.clone()]) {
        return Ok(EditOutcome::Skipped(SkipReason::EmptySelection));
    }
    if catalogue.is_empty() {
        return Ok(EditOutcome::Skipped(SkipReason::NoMarkersFound));
    }

    let tokens = alternation(catalogue);
    let block = Regex::new(&format!(r"([ \t]?){}([ \t]*)", block_comment(&tokens)))?;
    let line = Regex::new(&format!(r"[ \t]*{}", line_comment(&tokens)))?;

    let mut removed = 0;
    let mut out = String::with_capacity(selection.len());
    for raw in text[selection.clone()].split_inclusive('\n') {
        let (content, ending) = split_ending(raw);

        // The comment takes the space after it, or the one before it when code follows directly
        let without_blocks = block.replace_all(content, |caps: &Captures| {
            if caps[2].is_empty() {
                String::new()
            } else {
                caps[1].to_string()
            }
        });
        let cleaned = line.replace_all(&without_blocks, "");
        if cleaned == content {
            out.push_str(raw);
            continue;
        }

        removed += 1;
        let trimmed = cleaned.trim_end_matches(is_horizontal_space);
        if is_blank(trimmed) {
            continue;
        }
        out.push_str(trimmed);
        out.push_str(ending);
    }

    if removed == 0 {
        return Ok(EditOutcome::Skipped(SkipReason::NoMarkersFound));
    }
    debug!(lines = removed, "Erased markers");
    Ok(EditOutcome::Applied(Edit::new(
        EditKind::Erase,
        text,
        selection,
        out,
    )))
}

fn split_ending(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

/// Rewrite a selected block region onto a single line.
///
/// The selection, ignoring surrounding whitespace, must open with a block
/// start comment and close with the matching end comment of the same family.
/// Anything else is reported as not a removal block.
pub fn convert_to_inline(
    text: &str,
    selection: Range<usize>,
    config: &MarkerConfig,
) -> Result<EditOutcome> {
    check_selection(text, &selection)?;
    let selected = &text[selection.clone()];
    if is_blank(selected) {
        return Ok(EditOutcome::Skipped(SkipReason::EmptySelection));
    }

    let pairs = config.block_pairs();
    let starts: Vec<String> = pairs.iter().map(|(start, _)| start.clone()).collect();
    let ends: Vec<String> = pairs.iter().map(|(_, end)| end.clone()).collect();
    let shape = Regex::new(&format!(
        r"(?s)^/\*\s*({})\s*\*/(.*)/\*\s*({})\s*\*/$",
        alternation(&starts),
        alternation(&ends),
    ))?;

    let leading = &selected[..selected.len() - selected.trim_start().len()];
    let trailing = &selected[selected.trim_end().len()..];
    let core = selected.trim();

    let Some(captures) = shape.captures(core) else {
        return Ok(EditOutcome::Skipped(SkipReason::NotARemovalBlock));
    };
    let (start, body, end) = (&captures[1], &captures[2], &captures[3]);

    let Some((start, end)) = pairs
        .iter()
        .find(|(s, e)| s == start && e == end)
        .map(|(s, e)| (s.as_str(), e.as_str()))
    else {
        return Ok(EditOutcome::Skipped(SkipReason::NotARemovalBlock));
    };

    // A second region inside the selection means the outer comments do not pair
    let inner = Regex::new(&format!(
        "{}|{}",
        block_comment(&token_fragment(start)),
        block_comment(&token_fragment(end)),
    ))?;
    if is_blank(body) || inner.is_match(body) {
        return Ok(EditOutcome::Skipped(SkipReason::NotARemovalBlock));
    }

    let spacing = config.formatting.use_spacing;
    let replacement = format!(
        "{leading}{} {} {}{trailing}",
        CommentStyle::Block.render(start, spacing),
        collapse_line_breaks(body),
        CommentStyle::Block.render(end, spacing),
    );
    Ok(EditOutcome::Applied(Edit::new(
        EditKind::ConvertToInline,
        text,
        selection,
        replacement,
    )))
}
