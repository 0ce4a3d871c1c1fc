use serde::Deserialize;
use std::path::PathBuf;

/// Name of the CLI configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "DOCKER_CONFIG";

/// The parts of `config.json` this CLI understands.
///
/// The file is shared with other tools, so unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Extra plugin directories, searched after `DOCKER_CLI_PLUGIN_EXTRA_DIRS`
    /// and before the user plugin directory
    #[serde(default)]
    pub cli_plugins_extra_dirs: Vec<PathBuf>,
}
