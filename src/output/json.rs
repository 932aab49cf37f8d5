//! JSON output formatting

use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::meta::{DiscoverablePackage, Package};
use crate::tree::Entry;

use super::report::{ReportMetadata, Versions};

/// Machine-readable form of the report. Carries the same information as the
/// markdown as typed fields.
#[derive(Debug, Clone, Serialize)]
pub struct StructuredReport {
    pub project: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub project_type: String,
    pub generated: String,
    pub by: String,
    pub versions: Versions,
    pub packages: Vec<Package>,
    pub discoverable: Vec<DiscoverablePackage>,
    pub files: Vec<Entry>,
}

impl StructuredReport {
    pub fn new(metadata: ReportMetadata, files: Vec<Entry>) -> Self {
        Self {
            project: metadata.project,
            path: metadata.root,
            project_type: metadata.project_type,
            generated: metadata.generated,
            by: metadata.generator,
            versions: metadata.versions,
            packages: metadata.packages.packages,
            discoverable: metadata.packages.discoverable,
            files,
        }
    }

    /// Pretty-printed JSON with four-space indentation. Non-ASCII text is
    /// written as-is.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
