//! Entry types produced by the walker

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
}

/// One listed directory or file.
///
/// `path` is relative to the scan root and always uses `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub path: String,
    pub size: u64,
    /// Local modification time as `YYYY-MM-DD HH:MM`.
    pub modified: Option<String>,
}

impl Entry {
    pub fn dir(path: String, size: u64, modified: Option<String>) -> Self {
        Self {
            kind: EntryKind::Dir,
            path,
            size,
            modified,
        }
    }

    pub fn file(path: String, size: u64, modified: Option<String>) -> Self {
        Self {
            kind: EntryKind::File,
            path,
            size,
            modified,
        }
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Number of segments below the root, starting at 0.
    pub fn depth(&self) -> usize {
        self.path.matches('/').count()
    }
}
