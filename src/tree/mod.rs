//! Directory tree walking logic
//!
//! The walker produces a flat, ordered list of [`Entry`] values describing
//! everything under a scan root:
//!
//! - `PathFilter`: decides which base names are excluded
//! - `SizeCache`: memoized, depth-bounded directory sizes
//! - `TreeWalker`: pre-order traversal, directories before files

mod config;
mod entry;
mod filter;
mod size;
mod sort;
mod utils;
mod walker;

pub use config::WalkerConfig;
pub use entry::{Entry, EntryKind};
pub use filter::{MatchMode, PathFilter};
pub use size::SizeCache;
pub use sort::natural_cmp;
pub use utils::{canonical_key, modified_time, readable_size, relative_path};
pub use walker::TreeWalker;
