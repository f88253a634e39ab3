//! Project configuration files
//!
//! A project keeps its marker vocabulary and file filters in one file,
//! `buildstrip.toml` by default. JSON and YAML are accepted too; the format is
//! chosen by extension.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;
use strip_core::MarkerConfig;

use crate::filter::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE};
use crate::{Error, Result, io};

/// File name looked up in a project root
pub const CONFIG_FILE_NAME: &str = "buildstrip.toml";

/// Every file name recognised as project configuration, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "buildstrip.toml",
    "buildstrip.json",
    "buildstrip.yaml",
    "buildstrip.yml",
];

/// Contents of a project configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    #[serde(flatten)]
    pub markers: MarkerConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE.iter().map(|p| p.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|p| p.to_string()).collect(),
            markers: MarkerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and writes atomically.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Deserialize any value from `path`
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let format = Format::of(path)?;
        let content = io::read_text(path)?;

        let parse_error = |message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.name().into(),
            message,
        };
        match format {
            Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
            Format::Yaml => serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string())),
        }
    }

    /// Serialize `value` to `path` atomically
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let format = Format::of(path)?;
        let serialize_error = |message: String| Error::ConfigSerialize {
            path: path.to_path_buf(),
            format: format.name().into(),
            message,
        };

        let content = match format {
            Format::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
            }
            Format::Json => {
                serde_json::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
            }
            Format::Yaml => {
                serde_yaml::to_string(value).map_err(|e| serialize_error(e.to_string()))?
            }
        };

        io::write_atomic(path, content.as_bytes())
    }

    /// Load and validate a project configuration
    pub fn load_project(&self, path: &Path) -> Result<ProjectConfig> {
        let config: ProjectConfig = self.load(path)?;
        config.markers.validate()?;
        Ok(config)
    }

    /// Configuration file in `root`, if there is one
    pub fn find_in(&self, root: &Path) -> Option<std::path::PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|candidate| candidate.is_file())
    }
}
