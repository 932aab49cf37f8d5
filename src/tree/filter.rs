//! Exclusion filtering for tree walking

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// How exclusion names are compared with entry names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Literal equality with the base name. `*.php` only matches a file
    /// actually named `*.php`.
    #[default]
    Exact,
    /// Each name is a glob pattern tested against the base name.
    Glob,
}

/// Decides whether an entry is excluded, by base name, plus a set of exact
/// paths that are always skipped.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    names: IndexSet<String>,
    mode: MatchMode,
    /// Compiled patterns, only populated in glob mode.
    patterns: Vec<Pattern>,
    /// Absolute paths skipped regardless of name (e.g. the report files).
    skipped: HashSet<PathBuf>,
}

impl PathFilter {
    /// Merge default names with caller extras. Duplicates are dropped and the
    /// first occurrence keeps its position.
    pub fn new<D, E>(defaults: D, extras: E, mode: MatchMode) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let names: IndexSet<String> = defaults
            .into_iter()
            .map(Into::into)
            .chain(extras.into_iter().map(Into::into))
            .collect();

        let patterns = match mode {
            MatchMode::Exact => Vec::new(),
            MatchMode::Glob => names
                .iter()
                .filter_map(|name| match Pattern::new(name) {
                    Ok(p) => Some(p),
                    Err(e) => {
                        tracing::warn!(pattern = %name, error = %e, "invalid exclude pattern, matching literally");
                        None
                    }
                })
                .collect(),
        };

        Self {
            names,
            mode,
            patterns,
            skipped: HashSet::new(),
        }
    }

    /// Also skip these exact paths. They are compared with the walked paths
    /// as given, so pass them in the same form as the scan root.
    pub fn with_skipped_paths<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.skipped.extend(paths);
        self
    }

    /// Check if this exact path was marked as skipped.
    pub fn is_skipped_path(&self, path: &Path) -> bool {
        self.skipped.contains(path)
    }

    /// Exact-match filter over the given names.
    pub fn exact<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(names, Vec::<String>::new(), MatchMode::Exact)
    }

    /// Check if an entry with this base name is excluded.
    pub fn is_excluded(&self, name: &str) -> bool {
        if self.names.contains(name) {
            return true;
        }
        match self.mode {
            MatchMode::Exact => false,
            MatchMode::Glob => self.patterns.iter().any(|p| p.matches(name)),
        }
    }

    /// The merged exclusion names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }
}
