//! Report assembly: entries plus header metadata, rendered twice

use std::path::PathBuf;

use serde::Serialize;

use crate::meta::PackageManifest;
use crate::tree::Entry;

use super::json::StructuredReport;
use super::markdown::MarkdownFormatter;

/// Version strings shown in the header. Sentinels are already substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Versions {
    pub framework: String,
    pub runtime: String,
    pub database: String,
}

/// Display names for the framework and runtime version lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLabels {
    pub framework: String,
    pub runtime: String,
}

/// Everything in the report besides the entries.
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    pub project: String,
    pub root: PathBuf,
    pub project_type: String,
    pub generator: String,
    /// Local time as `YYYY-MM-DD HH:MM:SS`.
    pub generated: String,
    pub labels: VersionLabels,
    pub versions: Versions,
    pub packages: PackageManifest,
}

/// Both renderings of one run.
#[derive(Debug, Clone)]
pub struct Report {
    pub markdown: String,
    pub structured: StructuredReport,
}

impl Report {
    pub fn entry_count(&self) -> usize {
        self.structured.files.len()
    }
}

/// Render entries and metadata into markdown and the structured record.
/// Pure: no filesystem access.
pub fn build_report(entries: Vec<Entry>, metadata: ReportMetadata) -> Report {
    let mut formatter = MarkdownFormatter::new();
    formatter.write_header(&metadata);
    formatter.write_versions(&metadata.labels, &metadata.versions);
    formatter.write_packages(&metadata.packages);
    formatter.write_tree(&entries);

    Report {
        markdown: formatter.into_output(),
        structured: StructuredReport::new(metadata, entries),
    }
}
