//! Validated plugins

use std::path::PathBuf;
use std::sync::LazyLock;

use cliplugins_api::{Metadata, NAME_PREFIX, PLUGIN_NAME_PATTERN};
use regex::Regex;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::builtins::BuiltinCommands;
use super::candidate::Candidate;
use super::error::{ManagerError, ValidationError};

static PLUGIN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLUGIN_NAME_PATTERN).expect("plugin name pattern is valid"));

/// Whether `name` is acceptable as a plugin name.
pub fn is_valid_plugin_name(name: &str) -> bool {
    PLUGIN_NAME_RE.is_match(name)
}

/// A plugin candidate after validation.
///
/// A plugin with `err` set was found but is not usable. It is still a
/// legitimate value so listings can report why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Plugin {
    #[serde(flatten)]
    pub metadata: Metadata,

    /// Name with prefix and executable suffix removed
    pub name: String,

    /// Path of the winning candidate
    pub path: PathBuf,

    /// Set if the candidate failed validation
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_validation_error"
    )]
    pub err: Option<ValidationError>,

    /// Lower-priority candidates with the same name; never executed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shadowed_paths: Vec<PathBuf>,
}

impl Plugin {
    /// Validate a candidate against the naming rules, the host's built-in
    /// commands and its own metadata.
    ///
    /// Checks run in order and stop at the first failure: name pattern,
    /// built-in collision, metadata fetch, metadata parse. The candidate is
    /// only executed once the first two pass. Failures are recorded in
    /// [`Plugin::err`]; an `Err` is returned only when `candidate` could
    /// never have come from a directory scan (empty path, missing prefix or
    /// suffix).
    pub fn validate(
        candidate: &dyn Candidate,
        builtins: &BuiltinCommands,
        exe_suffix: &str,
    ) -> Result<Self, ManagerError> {
        let path = candidate.path();
        if path.as_os_str().is_empty() {
            return Err(ManagerError::EmptyPath);
        }

        let full_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ManagerError::NoBaseName {
                path: path.to_path_buf(),
            })?;
        let full_name =
            full_name
                .strip_suffix(exe_suffix)
                .ok_or_else(|| ManagerError::MissingSuffix {
                    path: path.to_path_buf(),
                    suffix: exe_suffix.to_string(),
                })?;
        let name = full_name
            .strip_prefix(NAME_PREFIX)
            .ok_or_else(|| ManagerError::MissingPrefix {
                path: path.to_path_buf(),
                prefix: NAME_PREFIX.to_string(),
            })?;

        let mut plugin = Plugin {
            metadata: Metadata::default(),
            name: name.to_string(),
            path: path.to_path_buf(),
            err: None,
            shadowed_paths: Vec::new(),
        };

        if !is_valid_plugin_name(&plugin.name) {
            let name = plugin.name.clone();
            return Ok(plugin.invalid(ValidationError::InvalidName { name }));
        }

        if builtins.contains(&plugin.name) {
            return Ok(plugin.invalid(ValidationError::DuplicatesBuiltin));
        }

        // Executability is not checked up front; a failed run says enough.
        let bytes = match candidate.metadata() {
            Ok(bytes) => bytes,
            Err(e) => return Ok(plugin.invalid(ValidationError::FetchMetadata(e.to_string()))),
        };

        match Metadata::from_slice(&bytes) {
            Ok(metadata) => plugin.metadata = metadata,
            Err(e) => return Ok(plugin.invalid(ValidationError::InvalidMetadata(e.to_string()))),
        }

        debug!(
            plugin = %plugin.name,
            path = %plugin.path.display(),
            version = %plugin.metadata.version,
            "Plugin candidate is valid"
        );
        Ok(plugin)
    }

    fn invalid(mut self, err: ValidationError) -> Self {
        debug!(
            plugin = %self.name,
            path = %self.path.display(),
            error = %err,
            "Plugin candidate is invalid"
        );
        self.err = Some(err);
        self
    }

    /// `Ok` for a usable plugin, otherwise the validation failure.
    pub fn is_valid(&self) -> Result<(), &ValidationError> {
        match &self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn serialize_validation_error<S: Serializer>(
    err: &Option<ValidationError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match err {
        Some(err) => serializer.serialize_str(&err.to_string()),
        None => serializer.serialize_none(),
    }
}
