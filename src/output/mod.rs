//! Report formatting and persistence
//!
//! # Module Structure
//!
//! - `report` - Report metadata types and `build_report`
//! - `markdown` - Markdown rendering
//! - `json` - Structured (JSON) rendering
//! - `writer` - Writes both artifacts to disk
//! - `console` - Colored run summary
//! - `config` - Output paths
//! - `utils` - Byte formatting helpers

mod config;
mod console;
mod json;
mod markdown;
mod report;
mod utils;
mod writer;

pub use config::{OutputConfig, json_path_for};
pub use console::{ColorMode, print_summary, should_use_color};
pub use json::StructuredReport;
pub use markdown::MarkdownFormatter;
pub use report::{Report, ReportMetadata, VersionLabels, Versions, build_report};
pub use utils::{display_size, format_bytes};
pub use writer::{ReportWriter, WrittenArtifacts};
