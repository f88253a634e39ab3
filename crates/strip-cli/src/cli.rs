//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// buildstrip - Remove marked code from builds
#[derive(Parser, Debug)]
#[command(name = "buildstrip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: nearest buildstrip.toml)
    #[arg(short, long, global = true, env = "BUILDSTRIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Strip marked regions from every eligible file under a directory
    ///
    /// Examples:
    ///   buildstrip strip                       # Production build, in place
    ///   buildstrip strip src --out dist        # Write results to dist/
    ///   buildstrip strip --mode development    # Strip development-only code
    ///   buildstrip strip --dry-run             # Show what would change
    Strip {
        /// Directory to process
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Write results under this directory instead of in place
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Build mode name
        #[arg(short, long, env = "BUILDSTRIP_MODE", default_value = "production")]
        mode: String,

        /// Run as a test-harness build
        #[arg(long)]
        test: bool,

        /// Glob of files to process (replaces the configured list)
        #[arg(long)]
        include: Vec<String>,

        /// Glob of files to leave alone (replaces the configured list)
        #[arg(long)]
        exclude: Vec<String>,

        /// Report unpaired markers instead of failing the file
        #[arg(long)]
        lenient: bool,

        /// Log every removed region
        #[arg(long)]
        debug: bool,

        /// Preview changes without writing them
        #[arg(long)]
        dry_run: bool,

        /// Output the build report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the marked regions of files
    Scan {
        /// Files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Report unpaired markers instead of failing
        #[arg(long)]
        lenient: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an editor command on a file
    ///
    /// Use 'buildstrip commands' to see the available commands.
    ///
    /// Examples:
    ///   buildstrip edit src/app.js wrap-block --lines 4:6
    ///   buildstrip edit src/app.js mark-line --lines 9 --write
    ///   buildstrip edit src/app.js erase-markers --diff
    Edit {
        /// File to edit
        file: PathBuf,

        /// Command name, e.g. wrap-block or buildstrip.wrapBlock
        command: String,

        /// Select whole lines, `START:END` or a single line (1-based)
        #[arg(short, long, conflicts_with = "range")]
        lines: Option<String>,

        /// Select a byte range `START..END`
        #[arg(short, long)]
        range: Option<String>,

        /// Print a unified diff instead of the edited text
        #[arg(long)]
        diff: bool,

        /// Write the result back to the file
        #[arg(short, long)]
        write: bool,
    },

    /// List the editor commands
    #[command(name = "commands")]
    ListCommands,

    /// Manage project configuration
    Config {
        /// Config action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Write a configuration file with the default markers
    Init {
        /// File format
        #[arg(long, value_enum, default_value = "toml")]
        format: ConfigFormat,

        /// Prompt for each marker and option
        #[arg(short, long)]
        interactive: bool,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Display the current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one setting
    Get {
        /// Setting key, e.g. lineMarker
        key: String,
    },

    /// Change one setting and save the file
    Set {
        /// Setting key, e.g. useSpacing
        key: String,
        /// New value
        value: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Toml => "buildstrip.toml",
            Self::Json => "buildstrip.json",
            Self::Yaml => "buildstrip.yaml",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_strip_defaults() {
        let cli = Cli::parse_from(["buildstrip", "strip"]);
        match cli.command {
            Some(Commands::Strip {
                root,
                out,
                test,
                dry_run,
                ..
            }) => {
                assert_eq!(root, PathBuf::from("."));
                assert_eq!(out, None);
                assert!(!test);
                assert!(!dry_run);
            }
            _ => panic!("Expected Strip command"),
        }
    }

    #[test]
    fn parse_strip_with_globs() {
        let cli = Cli::parse_from([
            "buildstrip",
            "strip",
            "src",
            "--mode",
            "staging",
            "--include",
            "**/*.rs",
            "--include",
            "**/*.js",
        ]);
        match cli.command {
            Some(Commands::Strip { mode, include, .. }) => {
                assert_eq!(mode, "staging");
                assert_eq!(include, vec!["**/*.rs", "**/*.js"]);
            }
            _ => panic!("Expected Strip command"),
        }
    }

    #[test]
    fn parse_edit_command() {
        let cli = Cli::parse_from(["buildstrip", "edit", "a.js", "wrap-block", "--lines", "2:4"]);
        match cli.command {
            Some(Commands::Edit {
                file,
                command,
                lines,
                write,
                ..
            }) => {
                assert_eq!(file, PathBuf::from("a.js"));
                assert_eq!(command, "wrap-block");
                assert_eq!(lines, Some("2:4".to_string()));
                assert!(!write);
            }
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn parse_edit_rejects_lines_with_range() {
        let result = Cli::try_parse_from([
            "buildstrip",
            "edit",
            "a.js",
            "wrap-block",
            "--lines",
            "1",
            "--range",
            "0..3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_config_set() {
        let cli = Cli::parse_from(["buildstrip", "config", "set", "useSpacing", "false"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Set { .. }
            })
        ));
    }

    #[test]
    fn parse_config_init_format() {
        let cli = Cli::parse_from(["buildstrip", "config", "init", "--format", "yaml"]);
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Init { format, .. },
            }) => assert_eq!(format.file_name(), "buildstrip.yaml"),
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["buildstrip", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
