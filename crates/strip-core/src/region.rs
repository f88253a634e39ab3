//! Located regions and marker diagnostics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Which syntax produced a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionKind {
    /// `/* START */ ... /* END */`
    BlockPair,
    /// `// START` ... `// END`
    LinePair,
    /// A single line ending in `// MARKER`
    LineMarker,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockPair => f.write_str("block"),
            Self::LinePair => f.write_str("line-pair"),
            Self::LineMarker => f.write_str("line"),
        }
    }
}

/// A located match, valid only for the text it was scanned from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub kind: RegionKind,
    /// Byte range removed by the stripper, delimiters included
    pub span: Range<usize>,
    /// Text between the delimiters (for line markers, the code before the comment)
    pub body: String,
    /// 1-based line of the opening delimiter
    pub start_line: usize,
    /// 1-based line of the closing delimiter
    pub end_line: usize,
}

impl Region {
    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        self.span.start < range.end && range.start < self.span.end
    }
}

/// Why a marker could not be paired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueReason {
    /// A start marker with no end marker after it
    Unterminated,
    /// An end marker with no open region
    UnexpectedEnd,
    /// A start marker inside an open region of the same family
    Nested,
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unterminated => f.write_str("start marker has no matching end marker"),
            Self::UnexpectedEnd => f.write_str("end marker has no matching start marker"),
            Self::Nested => f.write_str("regions of the same family cannot be nested"),
        }
    }
}

/// An unpaired marker occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerIssue {
    pub kind: RegionKind,
    pub token: String,
    pub offset: usize,
    pub line: usize,
    pub reason: IssueReason,
}

impl fmt::Display for MarkerIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unbalanced {} marker `{}` at line {} (byte {}): {}",
            self.kind, self.token, self.line, self.offset, self.reason
        )
    }
}
