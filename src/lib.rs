//! projdoc - snapshot a project's layout, sizes and versions as markdown and JSON

pub mod config;
pub mod error;
pub mod generate;
pub mod meta;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use error::{ProjdocError, Result};
pub use generate::{
    Collaborators, GenerateOptions, GenerateSummary, collect_metadata, generate, parse_depth,
    validate_root,
};
pub use output::{Report, ReportMetadata, ReportWriter, StructuredReport, build_report};
pub use tree::{Entry, EntryKind, MatchMode, PathFilter, SizeCache, TreeWalker, WalkerConfig};
