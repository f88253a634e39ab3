//! Where files come from and where rewritten files go
//!
//! The engine never touches the filesystem itself. A [`Host`] lists the files
//! of a build, reads them, and accepts rewritten text. Paths handed out by a
//! host are relative to its root.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use walkdir::WalkDir;

use crate::{Error, Result, io};

/// Source of files for a batch run
pub trait Host {
    /// Every file of the build, relative to the host root, in a stable order
    fn eligible_files(&self) -> Result<Vec<PathBuf>>;

    fn read_text(&self, path: &Path) -> Result<String>;

    /// Accept the rewritten contents of `path`
    fn write_text(&self, path: &Path, content: &str) -> Result<()>;

    /// Called for files that are left as they are
    fn pass_through(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Directories never worth descending into
const SKIPPED_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// A directory tree on disk.
///
/// Without an output root files are rewritten in place. With one, every file
/// is copied there, stripped where applicable, and the source tree is left
/// alone.
#[derive(Debug, Clone)]
pub struct FsHost {
    root: PathBuf,
    output: Option<PathBuf>,
}

impl FsHost {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = dunce::canonicalize(root).map_err(|e| Error::io(root, e))?;
        Ok(Self { root, output: None })
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn destination(&self, path: &Path) -> PathBuf {
        self.output.as_deref().unwrap_or(&self.root).join(path)
    }

    fn is_output_dir(&self, path: &Path) -> bool {
        self.output.as_deref().is_some_and(|out| {
            dunce::canonicalize(out).is_ok_and(|out| out == path)
        })
    }
}

impl Host for FsHost {
    fn eligible_files(&self) -> Result<Vec<PathBuf>> {
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let skipped = entry.file_type().is_dir()
                    && (entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| SKIPPED_DIRS.contains(&name))
                        || self.is_output_dir(entry.path()));
                !skipped
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| Error::Walk {
                path: self.root.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                files.push(relative.to_path_buf());
            }
        }
        debug!(root = %self.root.display(), files = files.len(), "Enumerated files");
        Ok(files)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        io::read_text(&self.root.join(path))
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        io::write_text(&self.destination(path), content)
    }

    fn pass_through(&self, path: &Path) -> Result<()> {
        if self.output.is_none() {
            return Ok(());
        }
        let source = self.root.join(path);
        let target = self.destination(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::copy(&source, &target).map_err(|e| Error::io(&source, e))?;
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Files held in memory, for embedders and tests
#[derive(Debug, Default)]
pub struct MemoryHost {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        lock(&self.files).insert(path.into(), content.into());
        self
    }

    /// Current contents of `path`
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        lock(&self.files).get(path.as_ref()).cloned()
    }
}

impl Host for MemoryHost {
    fn eligible_files(&self) -> Result<Vec<PathBuf>> {
        Ok(lock(&self.files).keys().cloned().collect())
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        lock(&self.files).get(path).cloned().ok_or_else(|| {
            Error::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file in memory host"),
            )
        })
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        lock(&self.files).insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

/// Wraps a host and records writes instead of performing them
#[derive(Debug)]
pub struct DryRun<'a, H: Host> {
    inner: &'a H,
    writes: Mutex<Vec<(PathBuf, String)>>,
}

impl<'a, H: Host> DryRun<'a, H> {
    pub fn new(inner: &'a H) -> Self {
        Self {
            inner,
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Writes that would have happened, in order
    pub fn into_writes(self) -> Vec<(PathBuf, String)> {
        self.writes
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<H: Host> Host for DryRun<'_, H> {
    fn eligible_files(&self) -> Result<Vec<PathBuf>> {
        self.inner.eligible_files()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.inner.read_text(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        lock(&self.writes).push((path.to_path_buf(), content.to_string()));
        Ok(())
    }
}
