//! Marker grammar, region scanning, and text rewriting for buildstrip
//!
//! Source files carry comment markers around code that must disappear from
//! certain builds. This crate finds those regions and rewrites text around
//! them. It never touches the filesystem: callers hand in text and receive
//! text back.
//!
//! # Region syntaxes
//!
//! ```text
//! /* BUILD_REMOVE_START */      // BUILD_REMOVE_START
//! removed();                    removed();
//! /* BUILD_REMOVE_END */        // BUILD_REMOVE_END
//!
//! removed(); // BUILD_REMOVE
//! ```
//!
//! The batch path runs [`gate`] then [`stripper`]. The interactive path uses
//! [`writer`] and [`eraser`] on a selected span and gets back one [`Edit`].

pub mod config;
pub mod edit;
pub mod eraser;
pub mod error;
pub mod gate;
pub mod lines;
pub mod pattern;
pub mod region;
pub mod scanner;
pub mod stripper;
pub mod writer;

pub use config::{
    BalancePolicy, CommentStyle, Families, FamilyKind, FormattingOptions, MarkerConfig,
    MarkerFamily, MarkerSet,
};
pub use edit::{Edit, EditKind, EditOutcome, SkipReason};
pub use eraser::{convert_to_inline, erase};
pub use error::{Error, Result};
pub use gate::{BuildMode, EnvironmentContext, Predicate, active_marker_sets, should_strip};
pub use pattern::MarkerPatterns;
pub use region::{IssueReason, MarkerIssue, Region, RegionKind};
pub use scanner::{ScanReport, scan};
pub use stripper::{Stripped, strip, strip_active, strip_all};
pub use writer::{WrapRequest, mark_lines, wrap};
