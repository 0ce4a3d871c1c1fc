//! Plugin manager error types

use std::path::PathBuf;
use std::process::ExitStatus;

use cliplugins_api::PLUGIN_NAME_PATTERN;
use thiserror::Error;

/// Errors that abort a plugin manager operation
#[derive(Error, Debug)]
pub enum ManagerError {
    /// Candidate was constructed with an empty path
    #[error("plugin candidate path cannot be empty")]
    EmptyPath,

    /// Candidate path has no usable final component
    #[error("unable to determine basename of plugin candidate {path:?}")]
    NoBaseName { path: PathBuf },

    /// Candidate lacks the platform executable suffix
    #[error("plugin candidate {path:?} lacks required {suffix:?} suffix")]
    MissingSuffix { path: PathBuf, suffix: String },

    /// Candidate lacks the plugin name prefix
    #[error("plugin candidate {path:?} does not have {prefix:?} prefix")]
    MissingPrefix { path: PathBuf, prefix: String },

    /// A plugin directory exists but could not be listed
    #[error("failed to read plugin directory {}: {source}", .dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No usable plugin by that name
    #[error("Error: No such CLI plugin: {name}")]
    NotFound { name: String },
}

impl ManagerError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }

    /// Whether this is the "no such plugin" condition.
    ///
    /// Hosts use this to fall back to their own unknown-command handling
    /// instead of reporting a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Why a candidate was found but is not usable.
///
/// Recorded on the [`Plugin`](super::Plugin) rather than returned, so that
/// a listing can show every plugin including broken ones.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("plugin candidate {name:?} did not match {pattern:?}", pattern = PLUGIN_NAME_PATTERN)]
    InvalidName { name: String },

    #[error("plugin duplicates builtin command")]
    DuplicatesBuiltin,

    #[error("failed to fetch metadata: {0}")]
    FetchMetadata(String),

    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
}

/// Failure to obtain metadata bytes from a candidate
#[derive(Error, Debug)]
pub enum CandidateError {
    /// The executable could not be started at all
    #[error("failed to run {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The executable ran but did not exit successfully
    #[error("{status}{}", stderr_detail(.stderr))]
    Exit { status: ExitStatus, stderr: String },
}

fn stderr_detail(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}
