//! cliplugins-core: CLI plugin support for the docker command line
//!
//! Lets the host CLI delegate subcommands it does not implement itself to
//! separately installed `docker-<name>` executables, while keeping broken,
//! suspicious or name-colliding plugins from ever running.
//!
//! See [`manager`] for discovery, validation and dispatch.

pub mod manager;

pub use manager::{
    BuiltinCommands, ManagerConfig, ManagerError, Plugin, PluginManager, ValidationError,
};
