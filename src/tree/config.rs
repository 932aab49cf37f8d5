//! Configuration types for the tree walker

use super::filter::PathFilter;

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Deepest level that is listed. Children of the root are level 0.
    /// `None` walks the whole tree.
    pub max_depth: Option<usize>,
    pub filter: PathFilter,
}

impl WalkerConfig {
    pub fn new(filter: PathFilter, max_depth: Option<usize>) -> Self {
        Self { max_depth, filter }
    }

    /// Check whether entries at `depth` lie beyond the bound.
    pub fn exceeds_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth > max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceeds_depth() {
        let unbounded = WalkerConfig::default();
        assert!(!unbounded.exceeds_depth(usize::MAX));

        let bounded = WalkerConfig::new(PathFilter::default(), Some(1));
        assert!(!bounded.exceeds_depth(0));
        assert!(!bounded.exceeds_depth(1));
        assert!(bounded.exceeds_depth(2));
    }
}
