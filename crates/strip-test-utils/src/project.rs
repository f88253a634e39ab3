//! [`TestProject`] builder for batch and CLI test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The workspace's `test-fixtures/` directory.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

fn copy_tree(from: &Path, to: &Path) {
    for entry in fs::read_dir(from).unwrap_or_else(|e| panic!("read {}: {e}", from.display())) {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            fs::create_dir_all(&target).unwrap();
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// A temporary source tree with helper methods for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use strip_test_utils::project::TestProject;
///
/// let project = TestProject::new()
///     .with_file("src/app.js", "run(); // BUILD_REMOVE\n")
///     .with_config("environments = [\"production\"]\n");
/// project.assert_file_contains("src/app.js", "BUILD_REMOVE");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Copy a directory under `test-fixtures/` into a fresh project.
    pub fn from_fixture(relative: &str) -> Self {
        let project = Self::new();
        copy_tree(&fixtures_dir().join(relative), project.root());
        project
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    /// Write a `buildstrip.toml` at the project root.
    pub fn with_config(self, toml: &str) -> Self {
        self.with_file("buildstrip.toml", toml)
    }

    /// Write `content` to `relative` without consuming the builder.
    pub fn write(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    /// Read `relative` as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", full_path.display()))
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` holds exactly `expected`.
    pub fn assert_file_eq(&self, relative: &str, expected: &str) {
        let actual = self.read(relative);
        assert_eq!(
            actual, expected,
            "File {} does not hold the expected content",
            relative
        );
    }

    /// Assert that `relative` contains `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            relative,
            content,
            file_content
        );
    }

    /// Assert that `relative` does not contain `content`.
    pub fn assert_file_lacks(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            !file_content.contains(content),
            "File {} unexpectedly contains {}.\nActual: {}",
            relative,
            content,
            file_content
        );
    }
}
