//! Region removal for the batch path

use tracing::debug;

use crate::config::{BalancePolicy, MarkerConfig, MarkerSet};
use crate::error::Result;
use crate::gate::{BuildMode, Predicate, active_marker_sets};
use crate::lines::collapse_blank_lines;
use crate::pattern::MarkerPatterns;
use crate::region::{MarkerIssue, Region};
use crate::scanner::scan_with;

/// Output of a strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    pub text: String,
    /// True iff at least one region was removed
    pub changed: bool,
    /// Removed regions, each with offsets into the text of its own pass
    pub removed: Vec<Region>,
    /// Unpaired markers left in place under the lenient policy
    pub issues: Vec<MarkerIssue>,
}

impl Stripped {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            changed: false,
            removed: Vec::new(),
            issues: Vec::new(),
        }
    }
}

/// Remove every region of one marker set.
///
/// When nothing matches the returned text is the input, byte for byte.
pub fn strip(text: &str, markers: &MarkerSet, policy: BalancePolicy) -> Result<Stripped> {
    strip_all(text, std::slice::from_ref(markers), policy)
}

/// Remove the regions of several marker sets, one pass per set, then
/// collapse blank-line runs once.
pub fn strip_all(text: &str, sets: &[MarkerSet], policy: BalancePolicy) -> Result<Stripped> {
    for (index, markers) in sets.iter().enumerate() {
        markers.validate(&format!("markers[{index}]"))?;
    }

    let mut result = Stripped::unchanged(text);
    for markers in sets {
        let patterns = MarkerPatterns::compile(markers)?;
        let report = scan_with(&result.text, &patterns, markers, policy)?;
        result.issues.extend(report.issues);
        if report.regions.is_empty() {
            continue;
        }

        debug!(
            start = %markers.block_start,
            regions = report.regions.len(),
            "Removing regions"
        );
        result.text = remove_regions(&result.text, &report.regions);
        result.removed.extend(report.regions);
        result.changed = true;
    }

    if result.changed {
        result.text = collapse_blank_lines(&result.text);
    }
    Ok(result)
}

/// Strip with every marker set whose gate is open for `mode`.
///
/// The configuration is validated before anything is scanned.
pub fn strip_active(
    text: &str,
    config: &MarkerConfig,
    predicate: Option<&Predicate>,
    mode: &BuildMode,
) -> Result<Stripped> {
    config.validate()?;
    let sets: Vec<MarkerSet> = active_marker_sets(config, predicate, mode)
        .into_iter()
        .map(|(_, markers)| markers)
        .collect();

    if sets.is_empty() {
        debug!(mode = %mode.name, test = mode.test, "No marker family is active");
        return Ok(Stripped::unchanged(text));
    }
    strip_all(text, &sets, config.balance)
}

/// Cut region spans out of `text`. Spans are sorted; touching or
/// overlapping spans are merged.
fn remove_regions(text: &str, regions: &[Region]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for region in regions {
        if region.span.start > cursor {
            out.push_str(&text[cursor..region.span.start]);
        }
        cursor = cursor.max(region.span.end);
    }
    out.push_str(&text[cursor..]);
    out
}
