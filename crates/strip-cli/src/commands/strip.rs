//! The batch `strip` command

use colored::Colorize;
use similar::TextDiff;
use std::path::PathBuf;
use strip_batch::{BuildReport, DryRun, FsHost, Host, TransformOptions, Transformer, run_with};
use strip_core::{BalancePolicy, BuildMode};

use crate::context::ProjectContext;
use crate::error::{CliError, Result};

/// Arguments of one `strip` invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripArgs {
    pub root: PathBuf,
    pub out: Option<PathBuf>,
    pub mode: String,
    pub test: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub lenient: bool,
    pub debug: bool,
    pub dry_run: bool,
    pub json: bool,
}

impl StripArgs {
    fn build_mode(&self) -> BuildMode {
        if self.test {
            BuildMode::testing(&self.mode)
        } else {
            BuildMode::new(&self.mode)
        }
    }

    /// Project options with command-line overrides applied
    fn options(&self, context: &ProjectContext) -> TransformOptions {
        let mut options = TransformOptions::from(context.config.clone());
        if !self.include.is_empty() {
            options.include = self.include.clone();
        }
        if !self.exclude.is_empty() {
            options.exclude = self.exclude.clone();
        }
        if self.lenient {
            options.config.balance = BalancePolicy::Lenient;
        }
        options.debug = self.debug;
        options
    }
}

/// Strip every eligible file under `args.root`
pub fn run_strip(context: &ProjectContext, args: &StripArgs) -> Result<()> {
    let mode = args.build_mode();
    let transformer = Transformer::new(args.options(context))?;

    let mut host = FsHost::new(&args.root)?;
    if let Some(out) = &args.out {
        host = host.with_output(out);
    }

    let report = if args.dry_run {
        let dry_run = DryRun::new(&host);
        let report = run_with(&dry_run, &transformer, &mode)?;
        if !args.json {
            for (path, content) in dry_run.into_writes() {
                let original = host.read_text(&path)?;
                let label = path.display().to_string();
                let diff = TextDiff::from_lines(&original, &content);
                print!(
                    "{}",
                    diff.unified_diff()
                        .header(&format!("a/{label}"), &format!("b/{label}"))
                );
            }
        }
        report
    } else {
        run_with(&host, &transformer, &mode)?
    };

    if args.json {
        let output = serde_json::json!({
            "mode": mode.name,
            "test": mode.test,
            "dryRun": args.dry_run,
            "report": report,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    } else {
        print_report(&report, args.dry_run);
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} file(s) could not be processed",
            report.failures.len()
        )))
    }
}

fn print_report(report: &BuildReport, dry_run: bool) {
    for file in &report.rewritten {
        println!(
            "  {} {} ({} region(s))",
            "-".red(),
            file.path.display(),
            file.regions_removed
        );
    }
    for failure in &report.failures {
        println!(
            "  {} {}: {}",
            "x".red().bold(),
            failure.path.display(),
            failure.error
        );
    }

    let verb = if dry_run { "Would strip" } else { "Stripped" };
    println!(
        "{} {} region(s) from {} of {} file(s)",
        verb.green().bold(),
        report.regions_removed(),
        report.rewritten.len(),
        report.processed
    );
}
