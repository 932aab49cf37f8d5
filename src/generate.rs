//! End-to-end documentation run
//!
//! `generate` validates the root, walks it, asks the collaborators for header
//! metadata, renders both documents and writes them. Only a bad root and write
//! failures are errors; everything else degrades to a default value.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::Config;
use crate::error::{ProjdocError, Result};
use crate::meta::{
    ComposerLock, NoPackages, PackageSource, UNAVAILABLE, UNKNOWN, VersionProbe, probe_for,
};
use crate::output::{
    OutputConfig, ReportMetadata, ReportWriter, VersionLabels, Versions, WrittenArtifacts,
    build_report,
};
use crate::tree::{PathFilter, TreeWalker, WalkerConfig};

/// Format used for the generation timestamp.
pub const GENERATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Per-invocation inputs, after CLI parsing.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub root: PathBuf,
    /// Markdown target. `None` uses the configured path, resolved against the root.
    pub output: Option<PathBuf>,
    /// Added to the configured exclusions.
    pub extra_excludes: Vec<String>,
    /// Deepest listed level; children of the root are level 0.
    pub max_depth: Option<usize>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub entries: usize,
    pub artifacts: WrittenArtifacts,
}

/// External sources for the report header.
pub struct Collaborators {
    pub framework: Box<dyn VersionProbe>,
    pub runtime: Box<dyn VersionProbe>,
    pub database: Box<dyn VersionProbe>,
    pub packages: Box<dyn PackageSource>,
}

impl Collaborators {
    /// Build the collaborators described by the config.
    pub fn from_config(config: &Config) -> Self {
        let packages: Box<dyn PackageSource> = if config.markdown.include_package_info {
            Box::new(ComposerLock::default())
        } else {
            Box::new(NoPackages)
        };
        Self {
            framework: probe_for(config.versions.framework.clone()),
            runtime: probe_for(config.versions.runtime.clone()),
            database: probe_for(config.versions.database.clone()),
            packages,
        }
    }
}

/// Interpret a `--depth` value. Anything that is not a non-negative integer
/// means unbounded.
pub fn parse_depth(raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(depth) => Some(depth),
        Err(_) => {
            tracing::warn!(value = raw, "invalid depth, walking without a limit");
            None
        }
    }
}

/// Check the scan root and return its canonical form.
pub fn validate_root(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(ProjdocError::RootNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ProjdocError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
}

/// Run the whole pipeline.
pub fn generate(
    options: &GenerateOptions,
    config: &Config,
    collaborators: &Collaborators,
) -> Result<GenerateSummary> {
    let root = validate_root(&options.root)?;

    let markdown_path = options
        .output
        .clone()
        .unwrap_or_else(|| root.join(&config.output.path));
    let output = OutputConfig::new(markdown_path, config.json.enabled);

    // the report files must not show up in their own listing
    let targets = std::iter::once(output.markdown_path.clone())
        .chain(output.json_path())
        .map(|path| resolve_target(&path));
    let filter = PathFilter::new(
        config.files.exclude.iter().cloned(),
        options.extra_excludes.iter().cloned(),
        config.files.match_mode,
    )
    .with_skipped_paths(targets);
    let walker = TreeWalker::new(WalkerConfig::new(filter, options.max_depth));
    tracing::info!(root = %root.display(), max_depth = ?options.max_depth, "walking project tree");
    let entries = walker.walk(&root);

    let metadata = collect_metadata(&root, config, collaborators);
    let report = build_report(entries, metadata);

    let artifacts = ReportWriter::new(output).write(&report)?;

    Ok(GenerateSummary {
        entries: report.entry_count(),
        artifacts,
    })
}

/// Absolute form of an output path, with the parent directory resolved the
/// same way the scan root is. A parent that does not exist yet is kept as is.
fn resolve_target(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let resolved = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => parent.canonicalize().ok().map(|dir| dir.join(name)),
        _ => None,
    };
    resolved.unwrap_or(absolute)
}

/// Gather header metadata, substituting sentinels for anything unavailable.
pub fn collect_metadata(root: &Path, config: &Config, collaborators: &Collaborators) -> ReportMetadata {
    let project = root
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string());

    ReportMetadata {
        project,
        root: root.to_path_buf(),
        project_type: config.project.project_type.clone(),
        generator: config.project.generator.clone(),
        generated: Local::now().format(GENERATED_FORMAT).to_string(),
        labels: VersionLabels {
            framework: config.project.framework_label.clone(),
            runtime: config.project.runtime_label.clone(),
        },
        versions: Versions {
            framework: collaborators.framework.version_or(UNKNOWN),
            runtime: collaborators.runtime.version_or(UNKNOWN),
            database: collaborators.database.version_or(UNAVAILABLE),
        },
        packages: collaborators.packages.packages_or_empty(root),
    }
}
