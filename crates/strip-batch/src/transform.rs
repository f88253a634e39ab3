//! The per-file transform hook
//!
//! A build pipeline calls [`transform`] once per module it loads. `None`
//! tells the pipeline to keep the original source untouched.

use std::fmt;
use std::path::{Path, PathBuf};
use strip_core::{BuildMode, MarkerConfig, Predicate, strip_active};
use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::filter::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE, PathFilter};
use crate::{Error, Result};

/// Options for one build
#[derive(Clone)]
pub struct TransformOptions {
    pub config: MarkerConfig,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Overrides the environment lists when set
    pub is_target_environment: Option<Predicate>,
    /// Log region-by-region detail at `info`. Output text is unaffected.
    pub debug: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            config: MarkerConfig::default(),
            include: DEFAULT_INCLUDE.iter().map(|p| p.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|p| p.to_string()).collect(),
            is_target_environment: None,
            debug: false,
        }
    }
}

impl fmt::Debug for TransformOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformOptions")
            .field("config", &self.config)
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("is_target_environment", &self.is_target_environment.is_some())
            .field("debug", &self.debug)
            .finish()
    }
}

impl From<ProjectConfig> for TransformOptions {
    fn from(project: ProjectConfig) -> Self {
        Self {
            config: project.markers,
            include: project.include,
            exclude: project.exclude,
            ..Self::default()
        }
    }
}

/// Rewritten source for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    pub code: String,
    pub regions_removed: usize,
}

/// Options with the globs compiled and the configuration validated, ready to
/// be applied to many files.
#[derive(Debug, Clone)]
pub struct Transformer {
    options: TransformOptions,
    filter: PathFilter,
}

impl Transformer {
    pub fn new(options: TransformOptions) -> Result<Self> {
        options.config.validate()?;
        let filter = PathFilter::new(&options.include, &options.exclude)?;
        Ok(Self { options, filter })
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    pub fn is_eligible(&self, path: &Path) -> bool {
        self.filter.is_eligible(path)
    }

    /// Strip `source` if `path` passes the filters.
    ///
    /// The gate is evaluated on every call, so one transformer can serve
    /// builds with different modes.
    pub fn transform(
        &self,
        path: &Path,
        source: &str,
        mode: &BuildMode,
    ) -> Result<Option<TransformResult>> {
        if !self.is_eligible(path) {
            debug!(path = %path.display(), "Skipping filtered file");
            return Ok(None);
        }

        let stripped = strip_active(
            source,
            &self.options.config,
            self.options.is_target_environment.as_ref(),
            mode,
        )
        .map_err(|source| Error::Transform {
            path: PathBuf::from(path),
            source,
        })?;

        if self.options.debug {
            for region in &stripped.removed {
                info!(
                    path = %path.display(),
                    kind = %region.kind,
                    start_line = region.start_line,
                    end_line = region.end_line,
                    "Removed region"
                );
            }
        }

        if !stripped.changed {
            debug!(path = %path.display(), "No regions removed");
            return Ok(None);
        }

        let regions_removed = stripped.removed.len();
        if self.options.debug {
            info!(path = %path.display(), regions_removed, "Transformed file");
        } else {
            debug!(path = %path.display(), regions_removed, "Transformed file");
        }
        Ok(Some(TransformResult {
            code: stripped.text,
            regions_removed,
        }))
    }
}

/// Transform a single file with freshly compiled options
pub fn transform(
    path: &Path,
    source: &str,
    options: &TransformOptions,
    mode: &BuildMode,
) -> Result<Option<TransformResult>> {
    Transformer::new(options.clone())?.transform(path, source, mode)
}
