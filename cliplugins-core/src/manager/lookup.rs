//! PluginManager - plugin lookup and dispatch

use std::ffi::OsStr;
use std::fs;
use std::process::Command;

use cliplugins_api::NAME_PREFIX;
use cliplugins_paths::PluginDirs;
use tracing::debug;

use super::builtins::BuiltinCommands;
use super::candidate::ExecCandidate;
use super::error::ManagerError;
use super::plugin::{Plugin, is_valid_plugin_name};
use super::scanner::{CandidateMap, is_absent, list_candidates};

/// Configuration for PluginManager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Directories to search, highest priority first
    pub dirs: PluginDirs,
    /// Executable suffix plugin files must carry (empty on unix)
    pub exe_suffix: String,
}

impl ManagerConfig {
    /// Search `dirs` using the platform executable suffix
    pub fn new(dirs: PluginDirs) -> Self {
        Self {
            dirs,
            exe_suffix: cliplugins_api::exe_suffix().to_string(),
        }
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new(cliplugins_paths::plugin_dirs().clone())
    }
}

/// Finds, validates and builds invocations for CLI plugins
#[derive(Debug, Clone)]
pub struct PluginManager {
    config: ManagerConfig,
}

impl PluginManager {
    pub fn new(config: ManagerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Scan all plugin directories for unvalidated candidates
    pub fn list_candidates(&self) -> Result<CandidateMap, ManagerError> {
        list_candidates(self.config.dirs.as_slice(), &self.config.exe_suffix)
    }

    /// List every discovered plugin, valid or not, sorted by name.
    ///
    /// Only the highest-priority candidate of each name is validated; the
    /// rest become its shadowed paths.
    pub fn list_plugins(&self, builtins: &BuiltinCommands) -> Result<Vec<Plugin>, ManagerError> {
        let candidates = self.list_candidates()?;

        let mut plugins = Vec::with_capacity(candidates.len());
        for (_, mut paths) in candidates {
            if paths.is_empty() {
                continue;
            }
            let shadowed = paths.split_off(1);
            let candidate = ExecCandidate::new(paths.remove(0));

            let mut plugin = Plugin::validate(&candidate, builtins, &self.config.exe_suffix)?;
            plugin.shadowed_paths = shadowed;
            plugins.push(plugin);
        }

        Ok(plugins)
    }

    /// Find the plugin called `name`.
    ///
    /// Only the first candidate found (in directory priority order) is
    /// validated and returned even if invalid. With `include_shadowed`, the
    /// remaining directories are still checked and matches recorded as
    /// shadowed paths; otherwise the search stops at the first hit.
    ///
    /// A name that could never be valid is reported as not found so callers
    /// fall back to their own unknown-command path.
    pub fn find_plugin(
        &self,
        name: &str,
        builtins: &BuiltinCommands,
        include_shadowed: bool,
    ) -> Result<Plugin, ManagerError> {
        if !is_valid_plugin_name(name) {
            return Err(ManagerError::not_found(name));
        }

        let exe_name = format!("{}{}{}", NAME_PREFIX, name, self.config.exe_suffix);
        let mut found: Option<Plugin> = None;

        for dir in self.config.dirs.iter() {
            let path = dir.join(&exe_name);

            // stat rather than letting exec report ENOENT: exec cannot tell a
            // missing file from a missing interpreter or shared library.
            if let Err(e) = fs::metadata(&path)
                && is_absent(&e)
            {
                continue;
            }

            match found.as_mut() {
                None => {
                    let candidate = ExecCandidate::new(path);
                    let plugin = Plugin::validate(&candidate, builtins, &self.config.exe_suffix)?;
                    if !include_shadowed {
                        return Ok(plugin);
                    }
                    found = Some(plugin);
                }
                Some(plugin) => plugin.shadowed_paths.push(path),
            }
        }

        found.ok_or_else(|| ManagerError::not_found(name))
    }

    /// Build a command running plugin `name` with `args`.
    ///
    /// An invalid plugin is reported as [`ManagerError::NotFound`], exactly
    /// like a missing one.
    pub fn run_command<I, S>(
        &self,
        name: &str,
        builtins: &BuiltinCommands,
        args: I,
    ) -> Result<Command, ManagerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let plugin = self.find_plugin(name, builtins, false)?;
        if let Err(e) = plugin.is_valid() {
            debug!(plugin = %name, error = %e, "Refusing to run invalid plugin");
            return Err(ManagerError::not_found(name));
        }

        let mut cmd = Command::new(&plugin.path);
        cmd.args(args);
        Ok(cmd)
    }

    /// Build a command running plugin `name` with this process's full
    /// argument list.
    ///
    /// The original arguments are used rather than whatever the host's
    /// parser left over, so global options reach the plugin too.
    pub fn plugin_run_command(
        &self,
        name: &str,
        builtins: &BuiltinCommands,
    ) -> Result<Command, ManagerError> {
        self.run_command(name, builtins, std::env::args_os().skip(1))
    }

    /// Build a command asking plugin `name` to print its own help.
    pub fn help_command(
        &self,
        name: &str,
        builtins: &BuiltinCommands,
    ) -> Result<Command, ManagerError> {
        self.run_command(name, builtins, ["help", name])
    }
}
