//! Locked package lists
//!
//! `ComposerLock` reads a `composer.lock` file: a JSON document whose
//! `packages` array holds `{ name, version, extra }` records. Packages whose
//! `extra.laravel` block lists service providers or aliases are reported as
//! discoverable.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: String,
    pub version: String,
}

/// A package that registers itself with the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoverablePackage {
    pub name: String,
    pub version: String,
    pub providers: Vec<String>,
    /// Alias name to target class, in manifest order.
    pub aliases: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageManifest {
    pub packages: Vec<Package>,
    pub discoverable: Vec<DiscoverablePackage>,
}

impl PackageManifest {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of the project's locked packages.
pub trait PackageSource {
    /// Read the manifest for the project at `root`. A project without a
    /// manifest yields an empty one, not an error.
    fn read_packages(&self, root: &Path) -> Result<PackageManifest, ManifestError>;

    /// The manifest, or an empty one on any failure.
    fn packages_or_empty(&self, root: &Path) -> PackageManifest {
        self.read_packages(root).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring package manifest");
            PackageManifest::default()
        })
    }
}

/// Package listing disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPackages;

impl PackageSource for NoPackages {
    fn read_packages(&self, _root: &Path) -> Result<PackageManifest, ManifestError> {
        Ok(PackageManifest::default())
    }
}

/// Reads `composer.lock` from the project root.
#[derive(Debug, Clone)]
pub struct ComposerLock {
    file_name: String,
}

impl Default for ComposerLock {
    fn default() -> Self {
        Self {
            file_name: "composer.lock".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct LockFile {
    /// Records are decoded one at a time so a bad one only loses itself.
    #[serde(default, deserialize_with = "lenient_list")]
    packages: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct LockedPackage {
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    version: String,
    #[serde(default)]
    extra: Value,
}

#[derive(Debug, Default, Deserialize)]
struct AutoRegistration {
    #[serde(default, deserialize_with = "lenient_strings")]
    providers: Vec<String>,
    #[serde(default, deserialize_with = "lenient_aliases")]
    aliases: IndexMap<String, String>,
}

// PHP encodes an empty map as `[]` and a missing value as `null`, so every
// field below accepts whatever shape it finds and keeps what it can use.

fn lenient_list<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_strings<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    let items = match Value::deserialize(de)? {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

fn lenient_aliases<'de, D: Deserializer<'de>>(de: D) -> Result<IndexMap<String, String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(alias, target)| match target {
                Value::String(target) => Some((alias, target)),
                _ => None,
            })
            .collect(),
        _ => IndexMap::new(),
    })
}

impl ComposerLock {
    /// Read a differently named lock file with the same format.
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Parse lock file text.
    pub fn parse(text: &str, origin: &Path) -> Result<PackageManifest, ManifestError> {
        let lock: LockFile = serde_json::from_str(text).map_err(|source| ManifestError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        let mut manifest = PackageManifest::default();
        for record in lock.packages {
            let pkg = match serde_json::from_value::<LockedPackage>(record) {
                Ok(pkg) => pkg,
                Err(e) => {
                    tracing::debug!(path = %origin.display(), error = %e, "skipping malformed package record");
                    continue;
                }
            };
            manifest.packages.push(Package {
                name: pkg.name.clone(),
                version: pkg.version.clone(),
            });

            // a malformed registration block only hides this package from
            // the discoverable list
            let registration = pkg
                .extra
                .get("laravel")
                .cloned()
                .and_then(|block| serde_json::from_value::<AutoRegistration>(block).ok());
            if let Some(reg) = registration {
                if !reg.providers.is_empty() || !reg.aliases.is_empty() {
                    manifest.discoverable.push(DiscoverablePackage {
                        name: pkg.name,
                        version: pkg.version,
                        providers: reg.providers,
                        aliases: reg.aliases,
                    });
                }
            }
        }
        Ok(manifest)
    }
}

impl PackageSource for ComposerLock {
    fn read_packages(&self, root: &Path) -> Result<PackageManifest, ManifestError> {
        let path = root.join(&self.file_name);
        if !path.is_file() {
            return Ok(PackageManifest::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&text, &path)
    }
}
