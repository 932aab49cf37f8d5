//! TreeWalker - flattens a directory tree into ordered entries

use std::collections::{HashSet, VecDeque};
use std::mem;
use std::path::{Path, PathBuf};

use super::config::WalkerConfig;
use super::entry::Entry;
use super::size::SizeCache;
use super::sort::natural_cmp;
use super::utils::{Child, canonical_key, modified_time, read_children, readable_size, relative_path};

/// Children of one directory waiting to be emitted.
struct Level {
    key: PathBuf,
    depth: usize,
    dirs: VecDeque<Child>,
    files: Vec<Child>,
}

/// Tree walker that lists every non-excluded entry under a root.
///
/// Output is pre-order: at each level all directories come first (each one
/// immediately followed by its own subtree), then the files. Both groups are
/// sorted with [`natural_cmp`]. Traversal uses an explicit stack, so very deep
/// trees do not grow the call stack.
pub struct TreeWalker {
    config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Walk `root` and return its entries. Directories that cannot be listed
    /// contribute nothing; the walk itself never fails.
    pub fn walk(&self, root: &Path) -> Vec<Entry> {
        let mut entries = Vec::new();
        let mut sizes = SizeCache::new(&self.config);
        let mut stack: Vec<Level> = Vec::new();
        let mut open: HashSet<PathBuf> = HashSet::new();

        if let Some(level) = self.open_level(root, 0) {
            open.insert(level.key.clone());
            stack.push(level);
        }

        while let Some(level) = stack.last_mut() {
            if let Some(dir) = level.dirs.pop_front() {
                let depth = level.depth;
                let size = sizes.size_of(&dir.path, depth + 1);
                entries.push(Entry::dir(
                    relative_path(root, &dir.path),
                    size,
                    modified_time(&dir.path),
                ));

                if open.contains(&canonical_key(&dir.path)) {
                    tracing::debug!(path = %dir.path.display(), "not descending into a link to an open ancestor");
                    continue;
                }
                if let Some(next) = self.open_level(&dir.path, depth + 1) {
                    open.insert(next.key.clone());
                    stack.push(next);
                }
            } else {
                let files = mem::take(&mut level.files);
                let key = mem::take(&mut level.key);
                stack.pop();
                open.remove(&key);

                entries.extend(files.into_iter().map(|file| {
                    Entry::file(
                        relative_path(root, &file.path),
                        readable_size(&file.path),
                        modified_time(&file.path),
                    )
                }));
            }
        }

        tracing::debug!(
            root = %root.display(),
            entries = entries.len(),
            cached_dirs = sizes.len(),
            "walk finished"
        );
        entries
    }

    /// Read and sort the children of `dir`, which sit at `depth`.
    fn open_level(&self, dir: &Path, depth: usize) -> Option<Level> {
        if self.config.exceeds_depth(depth) {
            return None;
        }
        let children = read_children(dir, &self.config.filter)?;

        let (mut dirs, mut files): (Vec<_>, Vec<_>) =
            children.into_iter().partition(|child| child.is_dir);
        dirs.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        files.sort_by(|a, b| natural_cmp(&a.name, &b.name));

        Some(Level {
            key: canonical_key(dir),
            depth,
            dirs: dirs.into(),
            files,
        })
    }
}
