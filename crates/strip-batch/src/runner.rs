//! Batch runner: every file of a host through one transformer

use serde::Serialize;
use std::path::{Path, PathBuf};
use strip_core::BuildMode;
use tracing::{info, warn};

use crate::host::Host;
use crate::transform::{TransformOptions, Transformer};
use crate::Result;

/// A file that was rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewrittenFile {
    pub path: PathBuf,
    pub regions_removed: usize,
}

/// A file that could not be processed; the rest of the build carried on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Files that passed the filters and were scanned
    pub processed: usize,
    pub rewritten: Vec<RewrittenFile>,
    /// Scanned files that needed no change
    pub unchanged: usize,
    /// Files rejected by the include/exclude filters
    pub skipped: usize,
    pub failures: Vec<FileFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn regions_removed(&self) -> usize {
        self.rewritten.iter().map(|f| f.regions_removed).sum()
    }
}

/// Run every file of `host` through `options`.
///
/// Only a bad configuration fails the run as a whole. A file that cannot be
/// read, stripped, or written is recorded in [`BuildReport::failures`].
pub fn run<H: Host>(host: &H, options: &TransformOptions, mode: &BuildMode) -> Result<BuildReport> {
    let transformer = Transformer::new(options.clone())?;
    run_with(host, &transformer, mode)
}

/// [`run`] with an already compiled transformer
pub fn run_with<H: Host>(
    host: &H,
    transformer: &Transformer,
    mode: &BuildMode,
) -> Result<BuildReport> {
    let mut report = BuildReport::default();

    for path in host.eligible_files()? {
        if !transformer.is_eligible(&path) {
            report.skipped += 1;
            if let Err(e) = host.pass_through(&path) {
                record_failure(&mut report, &path, e);
            }
            continue;
        }

        report.processed += 1;
        match process_file(host, transformer, &path, mode) {
            Ok(Some(regions_removed)) => report.rewritten.push(RewrittenFile {
                path,
                regions_removed,
            }),
            Ok(None) => report.unchanged += 1,
            Err(e) => record_failure(&mut report, &path, e),
        }
    }

    info!(
        processed = report.processed,
        rewritten = report.rewritten.len(),
        unchanged = report.unchanged,
        skipped = report.skipped,
        failures = report.failures.len(),
        mode = %mode.name,
        "Batch run complete"
    );
    Ok(report)
}

fn process_file<H: Host>(
    host: &H,
    transformer: &Transformer,
    path: &Path,
    mode: &BuildMode,
) -> Result<Option<usize>> {
    let source = host.read_text(path)?;
    match transformer.transform(path, &source, mode)? {
        Some(result) => {
            host.write_text(path, &result.code)?;
            Ok(Some(result.regions_removed))
        }
        None => {
            host.pass_through(path)?;
            Ok(None)
        }
    }
}

fn record_failure(report: &mut BuildReport, path: &Path, error: crate::Error) {
    warn!(path = %path.display(), error = %error, "File failed");
    report.failures.push(FileFailure {
        path: path.to_path_buf(),
        error: error.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_one_broken_file_does_not_stop_the_others() {
        let host = MemoryHost::new()
            .with_file("a.js", "a();\nb(); // BUILD_REMOVE\n")
            .with_file("broken.js", "/* BUILD_REMOVE_START */\nx();\n")
            .with_file("c.js", "c();\n")
            .with_file("notes.md", "d(); // BUILD_REMOVE\n");

        let report = run(&host, &TransformOptions::default(), &BuildMode::default()).unwrap();

        assert_eq!(report.processed, 3);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, PathBuf::from("broken.js"));
        assert_eq!(
            report.rewritten,
            vec![RewrittenFile {
                path: PathBuf::from("a.js"),
                regions_removed: 1
            }]
        );
        assert_eq!(host.get("a.js").as_deref(), Some("a();\n"));
        assert_eq!(host.get("notes.md").as_deref(), Some("d(); // BUILD_REMOVE\n"));
        assert!(!report.is_success());
    }

    #[test]
    fn test_invalid_glob_fails_the_whole_run() {
        let options = TransformOptions {
            include: vec!["[".to_string()],
            ..TransformOptions::default()
        };
        assert!(run(&MemoryHost::new(), &options, &BuildMode::default()).is_err());
    }
}
