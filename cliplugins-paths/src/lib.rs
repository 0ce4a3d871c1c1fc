//! Plugin search paths for the docker CLI.
//!
//! Plugins are looked up in an ordered list of directories, highest
//! priority first. The list is assembled from:
//!
//! 1. `DOCKER_CLI_PLUGIN_EXTRA_DIRS` (colon-separated, mostly for tests)
//! 2. extra directories from the client config file
//! 3. `~/.docker/cli-plugins`
//! 4. the system locations in [`SYSTEM_PLUGIN_DIRS`]

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable holding extra plugin directories, searched first.
pub const ENV_EXTRA_DIRS: &str = "DOCKER_CLI_PLUGIN_EXTRA_DIRS";

/// System-wide plugin directories, in priority order.
pub const SYSTEM_PLUGIN_DIRS: [&str; 4] = [
    "/usr/local/lib/docker/cli-plugins",
    "/usr/local/libexec/docker/cli-plugins",
    "/usr/lib/docker/cli-plugins",
    "/usr/libexec/docker/cli-plugins",
];

/// Get the per-user plugin directory for the given home directory.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use cliplugins_paths::user_plugin_dir;
///
/// let dir = user_plugin_dir(Path::new("/home/alice"));
/// assert_eq!(dir, PathBuf::from("/home/alice/.docker/cli-plugins"));
/// ```
pub fn user_plugin_dir(home: &Path) -> PathBuf {
    home.join(".docker/cli-plugins")
}

/// Ordered list of plugin directories, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluginDirs {
    dirs: Vec<PathBuf>,
}

impl PluginDirs {
    /// Use exactly the given directories.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Assemble the search path from its sources.
    ///
    /// `extra_env` is the raw value of [`ENV_EXTRA_DIRS`]; empty segments are
    /// dropped. `configured` comes from the client config file. The user
    /// directory is left out when `home` is unknown.
    pub fn resolve(extra_env: Option<&str>, configured: &[PathBuf], home: Option<&Path>) -> Self {
        let mut dirs = Vec::new();

        if let Some(extra) = extra_env {
            dirs.extend(
                extra
                    .split(':')
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from),
            );
        }

        dirs.extend(configured.iter().cloned());

        if let Some(home) = home {
            dirs.push(user_plugin_dir(home));
        }

        dirs.extend(SYSTEM_PLUGIN_DIRS.iter().map(PathBuf::from));

        Self { dirs }
    }

    /// Assemble the search path from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_with(&[])
    }

    /// Like [`from_env`](Self::from_env), with directories from the client
    /// config file slotted in after the environment override.
    pub fn from_env_with(configured: &[PathBuf]) -> Self {
        let extra = std::env::var(ENV_EXTRA_DIRS).ok();
        let home = dirs::home_dir();
        Self::resolve(extra.as_deref(), configured, home.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Get the process-wide plugin search path.
///
/// Computed from the environment on first call and cached for the life of
/// the process. Concurrent first callers block until it is ready and all
/// observe the same value.
pub fn plugin_dirs() -> &'static PluginDirs {
    static DIRS: OnceLock<PluginDirs> = OnceLock::new();
    DIRS.get_or_init(PluginDirs::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn system_dirs() -> Vec<PathBuf> {
        SYSTEM_PLUGIN_DIRS.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_resolve_defaults_only() {
        let dirs = PluginDirs::resolve(None, &[], Some(Path::new("/home/alice")));

        let mut expected = vec![PathBuf::from("/home/alice/.docker/cli-plugins")];
        expected.extend(system_dirs());
        assert_eq!(dirs.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_resolve_extra_dirs_come_first() {
        let configured = vec![PathBuf::from("/opt/configured")];
        let dirs = PluginDirs::resolve(
            Some("/tmp/a:/tmp/b"),
            &configured,
            Some(Path::new("/home/alice")),
        );

        let got: Vec<&Path> = dirs.iter().take(4).collect();
        assert_eq!(
            got,
            vec![
                Path::new("/tmp/a"),
                Path::new("/tmp/b"),
                Path::new("/opt/configured"),
                Path::new("/home/alice/.docker/cli-plugins"),
            ]
        );
        assert_eq!(dirs.len(), 4 + SYSTEM_PLUGIN_DIRS.len());
    }

    #[test]
    fn test_resolve_drops_empty_segments() {
        let dirs = PluginDirs::resolve(Some(":/tmp/a::"), &[], None);
        assert_eq!(dirs.iter().next(), Some(Path::new("/tmp/a")));
        assert_eq!(dirs.len(), 1 + SYSTEM_PLUGIN_DIRS.len());
    }

    #[test]
    fn test_resolve_without_home_skips_user_dir() {
        let dirs = PluginDirs::resolve(None, &[], None);
        assert_eq!(dirs.as_slice(), system_dirs().as_slice());
    }

    #[test]
    #[serial]
    fn test_from_env_respects_extra_dirs() {
        unsafe {
            std::env::set_var(ENV_EXTRA_DIRS, "/tmp/test-plugins");
        }
        let dirs = PluginDirs::from_env();
        assert_eq!(dirs.iter().next(), Some(Path::new("/tmp/test-plugins")));
        unsafe {
            std::env::remove_var(ENV_EXTRA_DIRS);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_with_places_configured_after_env() {
        unsafe {
            std::env::set_var(ENV_EXTRA_DIRS, "/tmp/env-plugins");
        }
        let dirs = PluginDirs::from_env_with(&[PathBuf::from("/tmp/config-plugins")]);
        let got: Vec<&Path> = dirs.iter().take(2).collect();
        assert_eq!(
            got,
            vec![Path::new("/tmp/env-plugins"), Path::new("/tmp/config-plugins")]
        );
        unsafe {
            std::env::remove_var(ENV_EXTRA_DIRS);
        }
    }

    #[test]
    fn test_plugin_dirs_is_cached() {
        let first = plugin_dirs();
        let second = plugin_dirs();
        assert!(std::ptr::eq(first, second));
    }
}
