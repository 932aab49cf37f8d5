//! Environment metadata collaborators
//!
//! The report header needs a few facts the file tree cannot provide: version
//! strings and the locked package list. Each source sits behind a trait so a
//! failing or missing source only costs its own section of the report.

mod packages;
mod versions;

pub use packages::{
    ComposerLock, DiscoverablePackage, ManifestError, NoPackages, Package, PackageManifest,
    PackageSource,
};
pub use versions::{
    CommandProbe, ProbeError, StaticVersion, UNAVAILABLE, UNKNOWN, Unconfigured, VersionProbe,
    VersionSpec, probe_for,
};
