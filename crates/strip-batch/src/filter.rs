//! Include/exclude path filters

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

use crate::{Error, Result};

/// Source extensions a bundler typically hands to the transform hook
pub const DEFAULT_INCLUDE: &[&str] = &[
    "**/*.js",
    "**/*.jsx",
    "**/*.ts",
    "**/*.tsx",
    "**/*.mjs",
    "**/*.cjs",
    "**/*.vue",
    "**/*.svelte",
];

pub const DEFAULT_EXCLUDE: &[&str] = &["**/node_modules/**"];

/// Compiled include/exclude globs.
///
/// A path is eligible when it matches at least one include pattern and no
/// exclude pattern. Paths are compared with forward slashes on every platform.
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl PathFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: build_set(include)?,
            exclude: build_set(exclude)?,
        })
    }

    pub fn is_eligible(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        self.include.is_match(&normalized) && !self.exclude.is_match(&normalized)
    }
}

impl PathFilter {
    /// The bundler-oriented defaults, [`DEFAULT_INCLUDE`] minus [`DEFAULT_EXCLUDE`]
    pub fn defaults() -> Result<Self> {
        let include: Vec<String> = DEFAULT_INCLUDE.iter().map(|p| p.to_string()).collect();
        let exclude: Vec<String> = DEFAULT_EXCLUDE.iter().map(|p| p.to_string()).collect();
        Self::new(&include, &exclude)
    }
}

fn build_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| Error::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| Error::InvalidGlob {
        pattern: patterns.join(", "),
        source,
    })
}
