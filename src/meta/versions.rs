//! Version probes for the report header

use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown when a framework or runtime version cannot be determined.
pub const UNKNOWN: &str = "Unknown";

/// Shown when the database cannot be reached.
pub const UNAVAILABLE: &str = "Unavailable";

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no version source configured")]
    Unconfigured,

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },

    #[error("{program} printed no version")]
    Empty { program: String },
}

/// Something that can report a version string.
pub trait VersionProbe {
    fn probe(&self) -> Result<String, ProbeError>;

    /// The probed version, or `fallback` on any failure.
    fn version_or(&self, fallback: &str) -> String {
        match self.probe() {
            Ok(version) => version,
            Err(ProbeError::Unconfigured) => fallback.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "version probe failed, using {fallback:?}");
                fallback.to_string()
            }
        }
    }
}

/// A version known up front.
#[derive(Debug, Clone)]
pub struct StaticVersion(pub String);

impl VersionProbe for StaticVersion {
    fn probe(&self) -> Result<String, ProbeError> {
        Ok(self.0.clone())
    }
}

/// No source configured; always fails with [`ProbeError::Unconfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl VersionProbe for Unconfigured {
    fn probe(&self) -> Result<String, ProbeError> {
        Err(ProbeError::Unconfigured)
    }
}

/// Runs a program and takes the first non-empty line of its stdout.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from an argv vector. `None` for an empty vector.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

impl VersionProbe for CommandProbe {
    fn probe(&self) -> Result<String, ProbeError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
            });
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ProbeError::Empty {
                program: self.program.clone(),
            })
    }
}

/// Config form of a version source: a literal value or a command to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionSpec {
    Value { value: String },
    Command { command: Vec<String> },
}

impl VersionSpec {
    /// Turn a config entry into a probe. An empty command is unconfigured.
    pub fn into_probe(self) -> Box<dyn VersionProbe> {
        match self {
            VersionSpec::Value { value } => Box::new(StaticVersion(value)),
            VersionSpec::Command { command } => match CommandProbe::from_argv(&command) {
                Some(probe) => Box::new(probe),
                None => Box::new(Unconfigured),
            },
        }
    }
}

/// Probe for an optional config entry.
pub fn probe_for(spec: Option<VersionSpec>) -> Box<dyn VersionProbe> {
    spec.map_or_else(|| Box::new(Unconfigured) as Box<dyn VersionProbe>, VersionSpec::into_probe)
}
