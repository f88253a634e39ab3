//! Atomic file writes with advisory locking

use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::warn;

use crate::{Error, Result};

/// Write `content` to `path` through a locked temp file and a rename.
///
/// The temp file sits next to the target so the rename stays on one
/// filesystem, and is removed again if any step fails. Missing parent
/// directories are created.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = path.with_file_name(format!(".{name}.{}.tmp", std::process::id()));

    let result = stage(&staging, content, path)
        .and_then(|()| fs::rename(&staging, path).map_err(|e| Error::io(path, e)));
    if result.is_err() && staging.exists() {
        if let Err(e) = fs::remove_file(&staging) {
            warn!(path = %staging.display(), error = %e, "Failed to remove staging file");
        }
    }
    result
}

/// Write and flush the staging file under an exclusive lock
fn stage(staging: &Path, content: &[u8], target: &Path) -> Result<()> {
    let lock_failed = || Error::LockFailed {
        path: target.to_path_buf(),
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(staging)
        .map_err(|e| Error::io(staging, e))?;
    file.lock_exclusive().map_err(|_| lock_failed())?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| Error::io(staging, e))?;
    file.unlock().map_err(|_| lock_failed())
}

/// Read a whole file as UTF-8
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write text atomically
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
