//! Run configuration loaded from `.projdoc.toml`
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! built-in behavior. CLI flags are layered on top in `main.rs`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ProjdocError, Result};
use crate::meta::VersionSpec;
use crate::tree::MatchMode;

/// File name looked up in the scan root when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = ".projdoc.toml";

/// Names skipped by default. Matched against base names only.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "vendor",
    "storage",
    "node_modules",
    "tests",
    ".git",
    "build",
    "dist",
    "coverage",
    ".idea",
    ".vscode",
    "target",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub output: OutputFileConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub json: JsonConfig,
    #[serde(default)]
    pub versions: VersionsConfig,
}

/// Labels shown in the report header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(rename = "type", default = "default_project_type")]
    pub project_type: String,
    #[serde(default = "default_generator")]
    pub generator: String,
    #[serde(default = "default_framework_label")]
    pub framework_label: String,
    #[serde(default = "default_runtime_label")]
    pub runtime_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,
    /// How exclusion names are compared with entry names.
    #[serde(rename = "match", default)]
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputFileConfig {
    /// Markdown output path; relative paths are resolved against the scan root.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkdownConfig {
    #[serde(default = "default_true")]
    pub include_package_info: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Where each version string in the report comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionsConfig {
    #[serde(default)]
    pub framework: Option<VersionSpec>,
    #[serde(default)]
    pub runtime: Option<VersionSpec>,
    #[serde(default)]
    pub database: Option<VersionSpec>,
}

fn default_true() -> bool {
    true
}

fn default_project_type() -> String {
    "Software Project".to_string()
}

fn default_generator() -> String {
    format!("projdoc {}", env!("CARGO_PKG_VERSION"))
}

fn default_framework_label() -> String {
    "Framework".to_string()
}

fn default_runtime_label() -> String {
    "Runtime".to_string()
}

fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("project-structure.md")
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_type: default_project_type(),
            generator: default_generator(),
            framework_label: default_framework_label(),
            runtime_label: default_runtime_label(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            exclude: default_excludes(),
            match_mode: MatchMode::default(),
        }
    }
}

impl Default for OutputFileConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            include_package_info: true,
        }
    }
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| ProjdocError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a config file. Missing or unreadable files are an error here;
    /// use [`Config::discover`] for the optional lookup.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ProjdocError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load `.projdoc.toml` from the scan root when present, defaults otherwise.
    pub fn discover(root: &Path) -> Result<Self> {
        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
