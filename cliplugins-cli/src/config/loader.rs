use super::types::{CONFIG_FILE_NAME, CliConfig, ENV_CONFIG_DIR};
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the directory chosen by `flag`,
    /// `DOCKER_CONFIG` or the home directory, in that order
    pub fn load(flag: Option<&Path>) -> Result<CliConfig> {
        match Self::config_dir(flag) {
            Some(dir) => Self::load_from(&dir.join(CONFIG_FILE_NAME)),
            None => {
                tracing::debug!("No config directory, using defaults");
                Ok(CliConfig::default())
            }
        }
    }

    /// Resolve the config directory from the process environment
    pub fn config_dir(flag: Option<&Path>) -> Option<PathBuf> {
        Self::resolve_dir(
            flag,
            std::env::var_os(ENV_CONFIG_DIR),
            dirs::home_dir().as_deref(),
        )
    }

    /// Pick the config directory: explicit flag, then env var, then
    /// `<home>/.docker`
    pub fn resolve_dir(
        flag: Option<&Path>,
        env: Option<OsString>,
        home: Option<&Path>,
    ) -> Option<PathBuf> {
        if let Some(dir) = flag {
            return Some(dir.to_path_buf());
        }
        if let Some(dir) = env.filter(|d| !d.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        home.map(|h| h.join(".docker"))
    }

    /// Read a config file. A missing file yields defaults; anything
    /// unreadable or malformed is an error.
    pub fn load_from(path: &Path) -> Result<CliConfig> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(CliConfig::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }
}
