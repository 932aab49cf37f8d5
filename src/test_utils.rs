//! Test utilities for building temporary project trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory for testing.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file with the given content.
    ///
    /// Creates parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    /// Add a file of exactly `len` bytes.
    pub fn add_sized(&self, path: &str, len: usize) -> PathBuf {
        self.add_bytes(path, &vec![b'x'; len])
    }

    /// Add an empty directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Make a path unreadable. Returns false when the current user can still
    /// read it anyway (e.g. running as root), so callers can skip.
    #[cfg(unix)]
    pub fn make_unreadable(&self, path: &str) -> bool {
        use std::os::unix::fs::PermissionsExt;

        let full_path = self.dir.path().join(path);
        fs::set_permissions(&full_path, fs::Permissions::from_mode(0o000))
            .expect("Failed to chmod");
        if full_path.is_dir() {
            fs::read_dir(&full_path).is_err()
        } else {
            fs::File::open(&full_path).is_err()
        }
    }

    /// Restore normal permissions so the temp dir can be cleaned up.
    #[cfg(unix)]
    pub fn make_readable(&self, path: &str) {
        use std::os::unix::fs::PermissionsExt;

        let full_path = self.dir.path().join(path);
        let mode = if full_path.is_dir() { 0o755 } else { 0o644 };
        fs::set_permissions(&full_path, fs::Permissions::from_mode(mode)).expect("Failed to chmod");
    }

    fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
