//! The `edit` and `commands` commands: editor operations on a file

use colored::Colorize;
use std::ops::Range;
use std::path::Path;
use strip_batch::io::{read_text, write_text};
use strip_editor::{Command, CommandOutcome, Document, Settings, execute};

use crate::context::ProjectContext;
use crate::error::{CliError, Result};

/// How the selection was given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionArg {
    /// Whole lines, 1-based and inclusive
    Lines(usize, usize),
    /// Byte offsets
    Range(Range<usize>),
    /// The entire file
    All,
}

impl SelectionArg {
    pub fn parse(lines: Option<&str>, range: Option<&str>) -> Result<Self> {
        match (lines, range) {
            (Some(lines), _) => parse_lines(lines),
            (None, Some(range)) => parse_range(range),
            (None, None) => Ok(Self::All),
        }
    }

    fn apply(&self, document: &mut Document) -> Result<()> {
        match self {
            Self::Lines(start, end) => document.select_lines(*start, *end)?,
            Self::Range(range) => document.select(range.clone())?,
            Self::All => {
                let len = document.text().len();
                document.select(0..len)?;
            }
        }
        Ok(())
    }
}

fn parse_number(value: &str, what: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::user(format!("Invalid {what} '{value}'")))
}

fn parse_lines(arg: &str) -> Result<SelectionArg> {
    let (start, end) = match arg.split_once(':') {
        Some((start, end)) => (parse_number(start, "line")?, parse_number(end, "line")?),
        None => {
            let line = parse_number(arg, "line")?;
            (line, line)
        }
    };
    Ok(SelectionArg::Lines(start, end))
}

fn parse_range(arg: &str) -> Result<SelectionArg> {
    let (start, end) = arg
        .split_once("..")
        .ok_or_else(|| CliError::user(format!("Invalid range '{arg}', expected START..END")))?;
    Ok(SelectionArg::Range(
        parse_number(start, "offset")?..parse_number(end, "offset")?,
    ))
}

/// What to do with the edited text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutput {
    Print,
    Diff,
    Write,
}

/// Run one editor command against `file`.
///
/// Warnings fail the command; informational outcomes do not.
pub fn run_edit(
    context: &ProjectContext,
    file: &Path,
    command: &str,
    selection: &SelectionArg,
    output: EditOutput,
) -> Result<()> {
    let command: Command = command.parse().map_err(CliError::user)?;
    if !command.needs_document() {
        return Err(CliError::user(
            "Use 'buildstrip config' to view or change settings",
        ));
    }

    let mut document = Document::new(read_text(file)?);
    selection.apply(&mut document)?;
    let mut settings = Settings::from_config(context.config.markers.clone())?;

    match execute(Some(&mut document), command, &mut settings)? {
        CommandOutcome::Applied(edit) => {
            tracing::debug!(kind = ?edit.kind, span = ?edit.span, "Edit applied");
        }
        CommandOutcome::Warning(message) => return Err(CliError::user(message)),
        CommandOutcome::Info(message) => eprintln!("{}: {}", "note".cyan().bold(), message),
    }

    match output {
        EditOutput::Print => print!("{}", document.text()),
        EditOutput::Diff => print!("{}", document.diff(&file.display().to_string())),
        EditOutput::Write if document.is_modified() => {
            write_text(file, document.text())?;
            eprintln!("{} {}", "Updated".green().bold(), file.display());
        }
        EditOutput::Write => {}
    }
    Ok(())
}

/// Print the editor command catalogue
pub fn run_commands() -> Result<()> {
    println!("{}", "Editor Commands".bold());
    println!();
    for command in Command::catalogue() {
        println!("  {:<28} {}", command.id(), command.title().dimmed());
    }
    Ok(())
}
