//! Project context detection
//!
//! Finds the configuration file governing a directory by walking up the tree,
//! so commands behave the same from any subdirectory of a project.

use std::path::{Path, PathBuf};
use strip_batch::{ConfigStore, ProjectConfig};
use tracing::debug;

use crate::error::{CliError, Result};

/// Configuration in effect for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub config: ProjectConfig,
    /// File the configuration came from; `None` means built-in defaults
    pub config_path: Option<PathBuf>,
}

impl ProjectContext {
    /// Load the explicit file if given, else the nearest one above `cwd`,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let start = dunce::canonicalize(cwd).unwrap_or_else(|_| cwd.to_path_buf());
                find_config(&start)
            }
        };

        let config = match &config_path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration");
                ConfigStore::new().load_project(path)?
            }
            None => {
                debug!(cwd = %cwd.display(), "No configuration found, using defaults");
                ProjectConfig::default()
            }
        };

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Path of the backing file, or an error telling the user to create one
    pub fn require_path(&self) -> Result<&Path> {
        self.config_path.as_deref().ok_or_else(|| {
            CliError::user(
                "No buildstrip configuration found. Run 'buildstrip config init' first.",
            )
        })
    }
}

/// Walk up from `start` to the first directory holding a configuration file
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let store = ConfigStore::new();
    start.ancestors().find_map(|dir| store.find_in(dir))
}
