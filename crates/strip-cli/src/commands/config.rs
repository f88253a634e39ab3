//! Configuration commands: init, show, get, set

use colored::Colorize;
use std::path::Path;
use strip_batch::{CONFIG_FILE_NAMES, ConfigStore, ProjectConfig};
use strip_core::BalancePolicy;
use strip_editor::Settings;

use crate::cli::ConfigFormat;
use crate::context::ProjectContext;
use crate::error::{CliError, Result};
use crate::interactive::interactive_init;

/// Project-level keys handled here rather than by editor settings
const PROJECT_KEYS: &[&str] = &["include", "exclude", "environments", "balance"];

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Create a configuration file in `dir`
pub fn run_config_init(dir: &Path, format: ConfigFormat, interactive: bool, force: bool) -> Result<()> {
    if !force {
        if let Some(existing) = CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
        {
            return Err(CliError::user(format!(
                "{} already exists. Use --force to overwrite it.",
                existing.display()
            )));
        }
    }

    let config = if interactive {
        interactive_init(&ProjectConfig::default())?
    } else {
        ProjectConfig::default()
    };

    let path = dir.join(format.file_name());
    ConfigStore::new().save(&path, &config)?;
    println!("{} {}", "Created".green().bold(), path.display());
    Ok(())
}

/// Display the configuration in effect
pub fn run_config_show(context: &ProjectContext, json: bool) -> Result<()> {
    let config = &context.config;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(config).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", "buildstrip Configuration".bold());
    println!();
    match &context.config_path {
        Some(path) => println!("  {:<22} {}", "Source:".dimmed(), path.display()),
        None => println!("  {:<22} {}", "Source:".dimmed(), "(defaults)".dimmed()),
    }
    println!();

    let settings = Settings::from_config(config.markers.clone())?;
    for (key, value) in settings.entries() {
        println!("  {:<22} {}", key, value);
    }
    println!();

    for key in PROJECT_KEYS {
        println!("  {:<22} {}", key, project_value(config, key).unwrap_or_default());
    }
    for (kind, family) in config.markers.families.iter() {
        println!(
            "  {:<22} {}",
            format!("{kind} environments"),
            family.environments.join(", ")
        );
    }
    Ok(())
}

fn project_value(config: &ProjectConfig, key: &str) -> Option<String> {
    let value = match key {
        "include" => config.include.join(", "),
        "exclude" => config.exclude.join(", "),
        "environments" => config.markers.environments.join(", "),
        "balance" => match config.markers.balance {
            BalancePolicy::Strict => "strict".to_string(),
            BalancePolicy::Lenient => "lenient".to_string(),
        },
        _ => return None,
    };
    Some(value)
}

/// Look up one key, project-level or editor setting
pub fn config_value(config: &ProjectConfig, key: &str) -> Result<String> {
    if let Some(value) = project_value(config, key) {
        return Ok(value);
    }
    Ok(Settings::from_config(config.markers.clone())?.get(key)?)
}

/// Apply one change to a configuration, validating the result
pub fn update_config(config: &mut ProjectConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "include" => config.include = split_list(value),
        "exclude" => config.exclude = split_list(value),
        "environments" => config.markers.environments = split_list(value),
        "balance" => {
            config.markers.balance = match value.trim() {
                "strict" => BalancePolicy::Strict,
                "lenient" => BalancePolicy::Lenient,
                other => {
                    return Err(CliError::user(format!(
                        "Invalid balance '{other}', expected strict or lenient"
                    )));
                }
            }
        }
        _ => {
            let mut settings = Settings::from_config(config.markers.clone())?;
            settings.set(key, value)?;
            config.markers = settings.to_config();
        }
    }
    Ok(())
}

pub fn run_config_get(context: &ProjectContext, key: &str) -> Result<()> {
    println!("{}", config_value(&context.config, key)?);
    Ok(())
}

/// Change one key and save the backing file
pub fn run_config_set(context: &ProjectContext, key: &str, value: &str) -> Result<()> {
    let path = context.require_path()?;
    let mut config = context.config.clone();
    update_config(&mut config, key, value)?;
    ConfigStore::new().save(path, &config)?;
    println!(
        "{} {} = {}",
        "Set".green().bold(),
        key,
        config_value(&config, key)?
    );
    Ok(())
}
