//! Shared utility functions for tree walking

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};

use super::filter::PathFilter;

/// Format used for entry modification times.
pub const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Resolve symlinks for use as a cache key, falling back to the raw path.
pub fn canonical_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Byte length of a file we are able to open, 0 otherwise.
///
/// Opening doubles as the readability check: a file that exists but cannot be
/// read counts as empty. Special files (FIFOs, sockets, devices) are never
/// opened and also count as empty.
pub fn readable_size(path: &Path) -> u64 {
    if !path.metadata().is_ok_and(|m| m.is_file()) {
        return 0;
    }
    match File::open(path).and_then(|f| f.metadata()) {
        Ok(meta) => meta.len(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "unreadable file counted as 0 bytes");
            0
        }
    }
}

/// Local modification time of a path, if the platform reports one.
pub fn modified_time(path: &Path) -> Option<String> {
    let mtime = path.metadata().and_then(|m| m.modified()).ok()?;
    let local: DateTime<Local> = mtime.into();
    Some(local.format(MODIFIED_FORMAT).to_string())
}

/// Path of `path` relative to `root`, joined with `/` on every platform.
///
/// Falls back to the full path (still `/`-joined) when `path` is not under
/// `root`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Base name of a path as a string, lossy for non-UTF-8 names.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}

/// A non-excluded child of a directory.
#[derive(Debug, Clone)]
pub struct Child {
    pub name: String,
    pub path: PathBuf,
    /// Classified through symlinks, like `Path::is_dir`.
    pub is_dir: bool,
}

/// List the non-excluded children of `dir`.
///
/// Returns `None` when the directory itself cannot be listed. Individual
/// entries that fail to read are skipped.
pub fn read_children(dir: &Path, filter: &PathFilter) -> Option<Vec<Child>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "cannot list directory");
            return None;
        }
    };

    Some(
        entries
            .filter_map(|e| e.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if filter.is_excluded(&name) {
                    return None;
                }
                let path = entry.path();
                if filter.is_skipped_path(&path) {
                    return None;
                }
                let is_dir = path.is_dir();
                Some(Child { name, path, is_dir })
            })
            .collect(),
    )
}
