//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based interactive selection.

use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use strip_batch::ProjectConfig;
use strip_core::{CommentStyle, MarkerSet};

use crate::error::{CliError, Result};

/// Comment styles offered for new markers
const STYLES: &[&str] = &["block", "line"];

/// Split a comma-separated answer into trimmed, non-empty items
fn parse_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run interactive `config init` prompts, starting from `defaults`
pub fn interactive_init(defaults: &ProjectConfig) -> Result<ProjectConfig> {
    let current = &defaults.markers;
    println!();

    let start: String = Input::new()
        .with_prompt("Start marker")
        .default(current.markers.block_start.clone())
        .interact_text()?;
    let end: String = Input::new()
        .with_prompt("End marker")
        .default(current.markers.block_end.clone())
        .interact_text()?;
    let line_marker: String = Input::new()
        .with_prompt("Single-line marker")
        .default(current.markers.line_marker.clone())
        .interact_text()?;

    let environments: String = Input::new()
        .with_prompt("Strip in environments (comma-separated)")
        .default(current.environments.join(", "))
        .interact_text()?;

    let style_idx = Select::new()
        .with_prompt("Default comment style")
        .items(STYLES)
        .default(0)
        .interact()?;
    let default_style: CommentStyle = STYLES[style_idx]
        .parse()
        .map_err(|reason: String| CliError::user(reason))?;

    let use_spacing = Confirm::new()
        .with_prompt("Pad markers with spaces inside comments?")
        .default(current.formatting.use_spacing)
        .interact()?;
    let add_empty_lines = Confirm::new()
        .with_prompt("Surround wrapped blocks with empty lines?")
        .default(current.formatting.add_empty_lines)
        .interact()?;

    let mut config = defaults.clone();
    config.markers.markers = MarkerSet::uniform(start.trim(), end.trim(), line_marker.trim());
    config.markers.environments = parse_list(&environments);
    config.markers.formatting.default_style = default_style;
    config.markers.formatting.use_spacing = use_spacing;
    config.markers.formatting.add_empty_lines = add_empty_lines;
    config.markers.validate()?;

    println!();
    println!("{}", "Summary:".bold());
    let markers = &config.markers.markers;
    println!("  {}: {}", "Start".dimmed(), markers.block_start.cyan());
    println!("  {}: {}", "End".dimmed(), markers.block_end.cyan());
    println!("  {}: {}", "Line".dimmed(), markers.line_marker.cyan());
    if config.markers.environments.is_empty() {
        println!("  {}: {}", "Environments".dimmed(), "(none)".dimmed());
    } else {
        println!(
            "  {}: {}",
            "Environments".dimmed(),
            config.markers.environments.join(", ").cyan()
        );
    }
    println!("  {}: {}", "Style".dimmed(), default_style.to_string().cyan());
    println!();

    let proceed = Confirm::new()
        .with_prompt("Proceed?")
        .default(true)
        .interact()?;

    if !proceed {
        return Err(CliError::user("Init cancelled by user."));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_parse() {
        for style in STYLES {
            assert!(style.parse::<CommentStyle>().is_ok());
        }
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list(" production, staging ,,"),
            vec!["production".to_string(), "staging".to_string()]
        );
        assert!(parse_list("  ").is_empty());
    }
}
