//! Plugin candidates: paths that might be plugins

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use cliplugins_api::METADATA_SUBCOMMAND;

use super::error::CandidateError;

/// A filesystem path that may turn out to be a plugin.
///
/// Split out as a trait so validation can be exercised without executing
/// anything.
pub trait Candidate {
    /// Path of the candidate executable
    fn path(&self) -> &Path;

    /// Raw metadata bytes reported by the candidate
    fn metadata(&self) -> Result<Vec<u8>, CandidateError>;
}

/// A candidate whose metadata is fetched by executing it with the metadata
/// subcommand.
///
/// The call blocks until the plugin exits; there is no timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCandidate {
    path: PathBuf,
}

impl ExecCandidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Candidate for ExecCandidate {
    fn path(&self) -> &Path {
        &self.path
    }

    fn metadata(&self) -> Result<Vec<u8>, CandidateError> {
        let output = Command::new(&self.path)
            .arg(METADATA_SUBCOMMAND)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CandidateError::Spawn {
                path: self.path.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CandidateError::Exit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}
