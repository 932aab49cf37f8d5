//! Output configuration types

use std::path::{Path, PathBuf};

/// Where and how the rendered report is persisted.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Markdown target.
    pub markdown_path: PathBuf,
    /// Also write the structured JSON record next to the markdown file.
    pub write_json: bool,
}

impl OutputConfig {
    pub fn new(markdown_path: impl Into<PathBuf>, write_json: bool) -> Self {
        Self {
            markdown_path: markdown_path.into(),
            write_json,
        }
    }

    /// JSON target, if enabled.
    pub fn json_path(&self) -> Option<PathBuf> {
        self.write_json.then(|| json_path_for(&self.markdown_path))
    }
}

/// Derive the JSON path from the markdown path: `.md` becomes `.json`, any
/// other name gets `.json` appended so the two files never collide.
pub fn json_path_for(markdown: &Path) -> PathBuf {
    match markdown.extension() {
        Some(ext) if ext == "md" => markdown.with_extension("json"),
        _ => {
            let mut name = markdown.as_os_str().to_owned();
            name.push(".json");
            PathBuf::from(name)
        }
    }
}
