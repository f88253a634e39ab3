//! Region scanning
//!
//! Three tiers run in priority order over the same text: block pairs, line
//! pairs, then single line markers. Once a tier claims a range, later tiers
//! ignore every marker inside it, so a character belongs to at most one
//! region per scan.
//!
//! Pairing is lazy: a start marker closes at the first end marker after it.
//! What happens to markers that do not pair up depends on [`BalancePolicy`].

use regex::Regex;
use std::ops::Range;
use tracing::{debug, warn};

use crate::config::{BalancePolicy, MarkerSet};
use crate::error::{Error, Result};
use crate::lines::{
    before_line_break, content_end, is_blank, is_horizontal_space, line_end, line_number,
    line_start, past_line_break,
};
use crate::pattern::MarkerPatterns;
use crate::region::{IssueReason, MarkerIssue, Region, RegionKind};

/// Regions found in one pass, plus markers that could not be paired
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Non-overlapping regions ordered by start offset
    pub regions: Vec<Region>,
    /// Unpaired markers (only populated under [`BalancePolicy::Lenient`])
    pub issues: Vec<MarkerIssue>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Start,
    End,
}

#[derive(Debug, Clone)]
struct Occurrence {
    role: Role,
    span: Range<usize>,
}

/// Find every region of `markers` in `text`.
///
/// Under [`BalancePolicy::Strict`] the first unpaired marker is returned as
/// [`Error::UnbalancedMarker`]. Under [`BalancePolicy::Lenient`] it is logged,
/// recorded in [`ScanReport::issues`], and left in place.
pub fn scan(text: &str, markers: &MarkerSet, policy: BalancePolicy) -> Result<ScanReport> {
    markers.validate("markers")?;
    let patterns = MarkerPatterns::compile(markers)?;
    scan_with(text, &patterns, markers, policy)
}

/// Scan with patterns compiled by the caller
pub fn scan_with(
    text: &str,
    patterns: &MarkerPatterns,
    markers: &MarkerSet,
    policy: BalancePolicy,
) -> Result<ScanReport> {
    let mut report = ScanReport::default();

    let tiers = [
        (
            RegionKind::BlockPair,
            &patterns.block_start,
            &patterns.block_end,
            &markers.block_start,
            &markers.block_end,
        ),
        (
            RegionKind::LinePair,
            &patterns.line_start,
            &patterns.line_end,
            &markers.line_start,
            &markers.line_end,
        ),
    ];

    for (kind, start_re, end_re, start_token, end_token) in tiers {
        let occurrences = collect_occurrences(text, start_re, end_re, &report.regions);
        let tokens = (start_token.as_str(), end_token.as_str());
        let found = pair_occurrences(text, kind, occurrences, tokens, policy, &mut report.issues)?;
        report.regions.extend(found);
    }

    scan_line_markers(text, &patterns.line_marker, &mut report.regions);
    report.regions.sort_by_key(|region| region.span.start);

    debug!(
        regions = report.regions.len(),
        issues = report.issues.len(),
        "Scanned text for markers"
    );

    Ok(report)
}

fn claimed(regions: &[Region], span: &Range<usize>) -> bool {
    regions.iter().any(|region| region.overlaps(span))
}

fn collect_occurrences(
    text: &str,
    start_re: &Regex,
    end_re: &Regex,
    regions: &[Region],
) -> Vec<Occurrence> {
    let starts = start_re.find_iter(text).map(|m| Occurrence {
        role: Role::Start,
        span: m.range(),
    });
    let ends = end_re.find_iter(text).map(|m| Occurrence {
        role: Role::End,
        span: m.range(),
    });

    let mut all: Vec<Occurrence> = starts
        .chain(ends)
        .filter(|occ| !claimed(regions, &occ.span))
        .collect();
    all.sort_by_key(|occ| (occ.span.start, std::cmp::Reverse(occ.span.end)));

    // A comment can only play one role
    let mut kept: Vec<Occurrence> = Vec::with_capacity(all.len());
    for occ in all {
        match kept.last() {
            Some(prev) if occ.span.start < prev.span.end => continue,
            _ => kept.push(occ),
        }
    }
    kept
}

fn pair_occurrences(
    text: &str,
    kind: RegionKind,
    occurrences: Vec<Occurrence>,
    (start_token, end_token): (&str, &str),
    policy: BalancePolicy,
    issues: &mut Vec<MarkerIssue>,
) -> Result<Vec<Region>> {
    let issue = |token: &str, offset: usize, reason: IssueReason| MarkerIssue {
        kind,
        token: token.to_string(),
        offset,
        line: line_number(text, offset),
        reason,
    };

    let mut regions = Vec::new();
    let mut open: Option<Range<usize>> = None;

    for occ in occurrences {
        match (occ.role, open.as_ref()) {
            (Role::Start, None) => open = Some(occ.span),
            (Role::Start, Some(_)) => {
                let found = issue(start_token, occ.span.start, IssueReason::Nested);
                report_issue(found, policy, issues)?;
            }
            (Role::End, Some(start)) => {
                regions.push(build_pair_region(text, kind, start.clone(), occ.span));
                open = None;
            }
            (Role::End, None) => {
                let found = issue(end_token, occ.span.start, IssueReason::UnexpectedEnd);
                report_issue(found, policy, issues)?;
            }
        }
    }

    if let Some(start) = open {
        let found = issue(start_token, start.start, IssueReason::Unterminated);
        report_issue(found, policy, issues)?;
    }

    Ok(regions)
}

fn report_issue(
    issue: MarkerIssue,
    policy: BalancePolicy,
    issues: &mut Vec<MarkerIssue>,
) -> Result<()> {
    match policy {
        BalancePolicy::Strict => Err(Error::UnbalancedMarker(issue)),
        BalancePolicy::Lenient => {
            warn!(
                token = %issue.token,
                line = issue.line,
                reason = %issue.reason,
                "Ignoring unbalanced {} marker",
                issue.kind
            );
            issues.push(issue);
            Ok(())
        }
    }
}

fn build_pair_region(
    text: &str,
    kind: RegionKind,
    open: Range<usize>,
    close: Range<usize>,
) -> Region {
    let raw_body = &text[open.end..close.start];
    let body = raw_body
        .strip_prefix("\r\n")
        .or_else(|| raw_body.strip_prefix('\n'))
        .unwrap_or(raw_body);
    let body = body.trim_end_matches(is_horizontal_space);
    let body = body
        .strip_suffix('\n')
        .map(|b| b.strip_suffix('\r').unwrap_or(b))
        .unwrap_or(body);

    Region {
        kind,
        span: removal_span(text, &open, &close),
        body: body.to_string(),
        start_line: line_number(text, open.start),
        end_line: line_number(text, close.start),
    }
}

/// The span to delete for a pair region.
///
/// A region standing on its own lines takes those whole lines with it. A
/// region sharing a line with code takes the horizontal space on one side so
/// the remaining code does not gain stray spaces.
fn removal_span(text: &str, open: &Range<usize>, close: &Range<usize>) -> Range<usize> {
    let first_line = line_start(text, open.start);
    let last_line_end = line_end(text, close.end);
    let alone_before = is_blank(&text[first_line..open.start]);
    let alone_after = is_blank(&text[close.end..last_line_end]);

    match (alone_before, alone_after) {
        (true, true) => first_line..past_line_break(text, last_line_end),
        (false, true) => {
            let before = &text[..open.start];
            let trimmed = before.trim_end_matches(is_horizontal_space);
            trimmed.len()..content_end(text, last_line_end)
        }
        (_, false) => {
            let after = &text[close.end..];
            let trimmed = after.trim_start_matches(is_horizontal_space);
            open.start..close.end + (after.len() - trimmed.len())
        }
    }
}

/// Whole-line regions for the single-line marker.
///
/// A pair region sharing the marked line is absorbed into the line region, so
/// one strip removes everything and a second strip finds nothing. When the
/// absorbed region starts after code on an earlier line, that code keeps its
/// own line.
fn scan_line_markers(text: &str, line_marker: &Regex, regions: &mut Vec<Region>) {
    for m in line_marker.find_iter(text) {
        // The comment opener decides ownership; a pair may open later in the comment
        if claimed(regions, &(m.start()..m.start() + 2)) {
            continue;
        }

        let first = line_start(text, m.start());
        let mut span = first..past_line_break(text, line_end(text, m.end()));
        loop {
            let before = regions.len();
            regions.retain(|region| {
                if region.overlaps(&span) {
                    span = span.start.min(region.span.start)..span.end.max(region.span.end);
                    false
                } else {
                    true
                }
            });
            if regions.len() == before {
                break;
            }
        }

        if span.start > line_start(text, span.start) {
            span.start = text[..span.start]
                .trim_end_matches(is_horizontal_space)
                .len();
            if span.end == line_start(text, span.end) {
                span.end = before_line_break(text, span.end);
            }
        }

        let line = line_number(text, m.start());
        regions.push(Region {
            kind: RegionKind::LineMarker,
            body: text[first..m.start()].trim().to_string(),
            start_line: line_number(text, span.start),
            end_line: line,
            span,
        });
    }
}
