//! Persisting rendered reports

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProjdocError, Result};

use super::config::OutputConfig;
use super::report::Report;

/// Paths that were actually written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub markdown: PathBuf,
    pub json: Option<PathBuf>,
}

/// Writes the markdown file and, when enabled, the JSON file beside it.
pub struct ReportWriter {
    config: OutputConfig,
}

impl ReportWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write both artifacts. The JSON is serialized and both files are
    /// staged next to their targets before either target is replaced, so a
    /// failure leaves the previous pair of files as it was.
    pub fn write(&self, report: &Report) -> Result<WrittenArtifacts> {
        let json = match self.config.json_path() {
            Some(path) => Some((path, report.structured.to_json()?)),
            None => None,
        };

        let markdown = self.config.markdown_path.clone();
        let staged_md = stage(&markdown, report.markdown.as_bytes())?;
        let staged_json = match &json {
            Some((path, text)) => match stage(path, text.as_bytes()) {
                Ok(staged) => Some(staged),
                Err(e) => {
                    discard(&staged_md);
                    return Err(e);
                }
            },
            None => None,
        };

        if let (Some((path, _)), Some(staged)) = (&json, &staged_json) {
            if let Err(e) = fs::rename(staged, path) {
                discard(staged);
                discard(&staged_md);
                return Err(ProjdocError::write(path, e));
            }
            tracing::info!(path = %path.display(), "wrote json");
        }
        fs::rename(&staged_md, &markdown).map_err(|e| {
            discard(&staged_md);
            ProjdocError::write(&markdown, e)
        })?;
        tracing::info!(path = %markdown.display(), "wrote markdown");

        Ok(WrittenArtifacts {
            markdown,
            json: json.map(|(path, _)| path),
        })
    }
}

/// Write `contents` beside `path` under a temporary name, creating missing
/// parent directories. Returns the temporary path.
fn stage(path: &Path, contents: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ProjdocError::write(parent, e))?;
    }
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    let staged = PathBuf::from(staged);
    fs::write(&staged, contents).map_err(|e| ProjdocError::write(path, e))?;
    Ok(staged)
}

fn discard(staged: &Path) {
    if let Err(e) = fs::remove_file(staged) {
        tracing::debug!(path = %staged.display(), error = %e, "could not remove staged file");
    }
}
