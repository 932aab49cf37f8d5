//! Markdown output formatting
//!
//! `MarkdownFormatter` builds the human-readable report section by section:
//! header, versions, optional package tables, then the flat entry list.

use crate::meta::PackageManifest;
use crate::tree::Entry;

use super::report::{ReportMetadata, VersionLabels, Versions};
use super::utils::{PLACEHOLDER, display_size, table_cell};

/// Accumulates report lines; joined with `\n` on output.
pub struct MarkdownFormatter {
    lines: Vec<String>,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Title and generation banner.
    pub fn write_header(&mut self, metadata: &ReportMetadata) {
        self.push(format!("# Project structure for `{}`", metadata.project));
        self.blank();
        self.push(format!("> Project Type: {}", metadata.project_type));
        self.push(format!("> Generated: {}", metadata.generated));
        self.push(format!("> Generated By: {}", metadata.generator));
        self.blank();
    }

    pub fn write_versions(&mut self, labels: &VersionLabels, versions: &Versions) {
        self.push("## Versions");
        self.push(format!("- {}: **{}**", labels.framework, versions.framework));
        self.push(format!("- {}: **{}**", labels.runtime, versions.runtime));
        self.push(format!("- Database: **{}**", versions.database));
        self.blank();
    }

    /// Package table and discoverable list; nothing when there are no packages.
    pub fn write_packages(&mut self, manifest: &PackageManifest) {
        if manifest.packages.is_empty() {
            return;
        }

        self.push("## Packages");
        self.push("| Package | Version |");
        self.push("|---------|---------|");
        for pkg in &manifest.packages {
            self.push(format!(
                "| {} | {} |",
                table_cell(&pkg.name),
                table_cell(&pkg.version)
            ));
        }
        self.blank();

        if manifest.discoverable.is_empty() {
            return;
        }

        self.push("## Discoverable Packages");
        for pkg in &manifest.discoverable {
            self.push(format!("- **{}** `{}`", pkg.name, pkg.version));
            if !pkg.providers.is_empty() {
                self.push("  - Providers:");
                for provider in &pkg.providers {
                    self.push(format!("    - `{}`", provider));
                }
            }
            if !pkg.aliases.is_empty() {
                self.push("  - Aliases:");
                for (alias, target) in &pkg.aliases {
                    self.push(format!("    - `{}` → `{}`", alias, target));
                }
            }
        }
        self.blank();
    }

    /// One line per entry: `- name — `size` — _modified: time_`.
    pub fn write_tree(&mut self, entries: &[Entry]) {
        self.push("## Project Tree");
        for entry in entries {
            let name = if entry.is_dir() {
                format!("**{}/**", entry.name())
            } else {
                entry.name().to_string()
            };
            let modified = entry.modified.as_deref().unwrap_or(PLACEHOLDER);
            self.push(format!(
                "- {} — `{}` — _modified: {}_",
                name,
                display_size(entry.size),
                modified
            ));
        }
    }

    /// Get the formatted output, newline-terminated.
    pub fn into_output(self) -> String {
        let mut output = self.lines.join("\n");
        output.push('\n');
        output
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}
