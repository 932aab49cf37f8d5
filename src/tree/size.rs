//! Memoized, depth-bounded directory sizes

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::config::WalkerConfig;
use super::utils::{Child, canonical_key, read_children, readable_size};

/// A directory whose children are still being summed.
struct Frame {
    key: PathBuf,
    depth: usize,
    pending: Vec<Child>,
    total: u64,
}

/// Directory size calculator that remembers every directory it has summed.
///
/// Keys are canonical paths, so a directory reached through a symlink reuses
/// the size computed for its target. The key does not include the depth: the
/// first computation of a directory wins for the rest of the run.
pub struct SizeCache<'a> {
    config: &'a WalkerConfig,
    sizes: HashMap<PathBuf, u64>,
}

impl<'a> SizeCache<'a> {
    pub fn new(config: &'a WalkerConfig) -> Self {
        Self {
            config,
            sizes: HashMap::new(),
        }
    }

    /// Total bytes of the non-excluded files under `dir`.
    ///
    /// `depth` is the level the children of `dir` sit at. When it is beyond
    /// the configured bound the directory counts (and is cached) as 0. Deeper
    /// subdirectories are summed at `depth + 1` with the same rule. Unreadable
    /// files and unlistable directories count as 0; this never fails.
    pub fn size_of(&mut self, dir: &Path, depth: usize) -> u64 {
        let key = canonical_key(dir);
        if let Some(&size) = self.sizes.get(&key) {
            return size;
        }
        if self.config.exceeds_depth(depth) {
            self.sizes.insert(key, 0);
            return 0;
        }

        let Some(root) = self.open(dir, key, depth) else {
            return 0;
        };
        let mut stack = vec![root];
        let mut open: HashSet<PathBuf> = stack.iter().map(|f| f.key.clone()).collect();

        let mut result = 0;
        while let Some(frame) = stack.last_mut() {
            match frame.pending.pop() {
                Some(child) if !child.is_dir => {
                    frame.total += readable_size(&child.path);
                }
                Some(child) => {
                    let key = canonical_key(&child.path);
                    let child_depth = frame.depth + 1;
                    if let Some(&size) = self.sizes.get(&key) {
                        frame.total += size;
                    } else if open.contains(&key) {
                        tracing::debug!(path = %child.path.display(), "directory re-entered through a link, counted as 0");
                    } else if self.config.exceeds_depth(child_depth) {
                        self.sizes.insert(key, 0);
                    } else if let Some(next) = self.open(&child.path, key, child_depth) {
                        open.insert(next.key.clone());
                        stack.push(next);
                    }
                }
                None => {
                    let total = frame.total;
                    let key = std::mem::take(&mut frame.key);
                    stack.pop();
                    open.remove(&key);
                    self.sizes.insert(key, total);
                    match stack.last_mut() {
                        Some(parent) => parent.total += total,
                        None => result = total,
                    }
                }
            }
        }
        result
    }

    /// Number of directories with a cached size.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    fn open(&self, dir: &Path, key: PathBuf, depth: usize) -> Option<Frame> {
        let pending = read_children(dir, &self.config.filter)?;
        Some(Frame {
            key,
            depth,
            pending,
            total: 0,
        })
    }
}
