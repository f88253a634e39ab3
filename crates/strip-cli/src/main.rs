//! buildstrip CLI
//!
//! Strips marked regions from source trees and runs the editor commands on
//! single files.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigAction};
use commands::{EditOutput, SelectionArg, StripArgs};
use context::ProjectContext;
use error::Result;

/// Environment variable holding a tracing filter, e.g. `strip_batch=debug`
const LOG_ENV: &str = "BUILDSTRIP_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.config.as_deref()),
        None => {
            println!(
                "{} Remove marked code from builds",
                "buildstrip".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "buildstrip --help".cyan());
            Ok(())
        }
    }
}

/// Logs go to stderr so JSON output on stdout stays parseable
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(cmd: Commands, config: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir()?;

    match cmd {
        Commands::Strip {
            root,
            out,
            mode,
            test,
            include,
            exclude,
            lenient,
            debug,
            dry_run,
            json,
        } => {
            let context = ProjectContext::load(config, &root)?;
            let args = StripArgs {
                root,
                out,
                mode,
                test,
                include,
                exclude,
                lenient,
                debug,
                dry_run,
                json,
            };
            commands::run_strip(&context, &args)
        }
        Commands::Scan {
            files,
            lenient,
            json,
        } => {
            let context = ProjectContext::load(config, &cwd)?;
            commands::run_scan(&context, &files, lenient, json)
        }
        Commands::Edit {
            file,
            command,
            lines,
            range,
            diff,
            write,
        } => {
            let context = ProjectContext::load(config, &cwd)?;
            let selection = SelectionArg::parse(lines.as_deref(), range.as_deref())?;
            let output = if write {
                EditOutput::Write
            } else if diff {
                EditOutput::Diff
            } else {
                EditOutput::Print
            };
            commands::run_edit(&context, &file, &command, &selection, output)
        }
        Commands::ListCommands => commands::run_commands(),
        Commands::Config { action } => match action {
            ConfigAction::Init {
                format,
                interactive,
                force,
            } => commands::run_config_init(&cwd, format, interactive, force),
            ConfigAction::Show { json } => {
                let context = ProjectContext::load(config, &cwd)?;
                commands::run_config_show(&context, json)
            }
            ConfigAction::Get { key } => {
                let context = ProjectContext::load(config, &cwd)?;
                commands::run_config_get(&context, &key)
            }
            ConfigAction::Set { key, value } => {
                let context = ProjectContext::load(config, &cwd)?;
                commands::run_config_set(&context, &key, &value)
            }
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "buildstrip", &mut std::io::stdout());
            Ok(())
        }
    }
}
