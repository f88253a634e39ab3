//! The `scan` command: list regions without changing anything

use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use strip_batch::io::read_text;
use strip_core::{BalancePolicy, MarkerConfig, MarkerIssue, MarkerSet, Region, scan};

use crate::context::ProjectContext;
use crate::error::{CliError, Result};

/// Regions of one family in one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyScan {
    pub path: PathBuf,
    pub family: String,
    pub regions: Vec<Region>,
    pub issues: Vec<MarkerIssue>,
}

/// Every marker set with its display label, default family first
fn labelled_sets(config: &MarkerConfig) -> Vec<(String, MarkerSet)> {
    std::iter::once(("default".to_string(), config.markers.clone()))
        .chain(
            config
                .families
                .iter()
                .map(|(kind, family)| (kind.to_string(), family.markers())),
        )
        .collect()
}

/// Scan one file against every family; families without findings are omitted
pub fn scan_file(path: &Path, config: &MarkerConfig, policy: BalancePolicy) -> Result<Vec<FamilyScan>> {
    let text = read_text(path)?;
    let mut scans = Vec::new();

    for (family, markers) in labelled_sets(config) {
        let report = scan(&text, &markers, policy)
            .map_err(|e| CliError::user(format!("{}: {e}", path.display())))?;
        if report.regions.is_empty() && report.issues.is_empty() {
            continue;
        }
        scans.push(FamilyScan {
            path: path.to_path_buf(),
            family,
            regions: report.regions,
            issues: report.issues,
        });
    }
    Ok(scans)
}

/// First line of a region body, shortened for a one-line listing
fn preview(body: &str) -> String {
    let first = body.trim().lines().next().unwrap_or_default();
    let mut short: String = first.chars().take(60).collect();
    if short.len() < first.len() || body.trim().lines().nth(1).is_some() {
        short.push_str(" ...");
    }
    short
}

pub fn run_scan(context: &ProjectContext, files: &[PathBuf], lenient: bool, json: bool) -> Result<()> {
    let policy = if lenient {
        BalancePolicy::Lenient
    } else {
        context.config.markers.balance
    };

    let mut all = Vec::new();
    for path in files {
        all.extend(scan_file(path, &context.config.markers, policy)?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&all).unwrap_or_default());
        return Ok(());
    }

    for path in files {
        println!("{}", path.display().to_string().bold());
        let mut found = false;
        for entry in all.iter().filter(|s| &s.path == path) {
            for region in &entry.regions {
                found = true;
                let lines = format!("{}-{}", region.start_line, region.end_line);
                println!(
                    "  {:<10} {:<8} {:<12} {}",
                    region.kind.to_string(),
                    lines,
                    entry.family.dimmed(),
                    preview(&region.body)
                );
            }
            for issue in &entry.issues {
                found = true;
                println!("  {} {}", "!".yellow().bold(), issue);
            }
        }
        if !found {
            println!("  {}", "(no regions)".dimmed());
        }
    }
    Ok(())
}
