//! CLI plugin manager
//!
//! This module discovers external `docker-<name>` executables and exposes
//! them to the host as subcommands:
//!
//! - [`list_candidates`]: groups plugin-looking files by derived name
//! - [`Plugin::validate`]: naming, built-in collision and metadata checks
//! - [`PluginManager`]: listing, lookup by name and command building
//!
//! # Precedence
//!
//! Directories are searched in [`PluginDirs`](cliplugins_paths::PluginDirs)
//! order. For each name only the first match is ever validated or run; later
//! matches are kept as shadowed paths for diagnostics.
//!
//! # Failure modes
//!
//! - Infrastructure problems (unreadable directory, malformed candidate
//!   path) are returned as [`ManagerError`].
//! - A broken plugin is still returned, with [`Plugin::err`] set.
//! - A missing plugin is [`ManagerError::NotFound`]. The run and help
//!   builders also report invalid plugins this way.
//!
//! # Example
//!
//! ```no_run
//! use cliplugins_core::manager::{BuiltinCommands, ManagerConfig, PluginManager};
//!
//! let manager = PluginManager::new(ManagerConfig::default());
//! let builtins = BuiltinCommands::new().with("version", Vec::<String>::new());
//!
//! match manager.plugin_run_command("helloworld", &builtins) {
//!     Ok(mut cmd) => {
//!         let status = cmd.status()?;
//!         std::process::exit(status.code().unwrap_or(1));
//!     }
//!     Err(e) if e.is_not_found() => eprintln!("unknown command"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builtins;
mod candidate;
mod error;
mod lookup;
mod plugin;
mod scanner;

pub use builtins::BuiltinCommands;
pub use candidate::{Candidate, ExecCandidate};
pub use error::{CandidateError, ManagerError, ValidationError};
pub use lookup::{ManagerConfig, PluginManager};
pub use plugin::{Plugin, is_valid_plugin_name};
pub use scanner::{CandidateMap, list_candidates, plugin_name_from_file_name};
