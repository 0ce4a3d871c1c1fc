//! cliplugins-api - the contract between the docker CLI and its plugins
//!
//! A CLI plugin is a standalone executable named `docker-<name>` (plus the
//! platform executable suffix, see [`exe_suffix`]) installed in one of the
//! plugin directories. The host never links against it; the only thing the
//! two sides share is the protocol defined here:
//!
//! - the executable must answer [`METADATA_SUBCOMMAND`] by printing a single
//!   JSON [`Metadata`] object on stdout and exiting 0,
//! - `<name>` must match [`PLUGIN_NAME_PATTERN`].
//!
//! # Example
//!
//! ```
//! use cliplugins_api::Metadata;
//!
//! let meta = Metadata::from_slice(br#"{"Version": "0.1.0", "Vendor": "Docker Inc."}"#).unwrap();
//! assert_eq!(meta.version, "0.1.0");
//! assert_eq!(meta.short_description, "");
//! ```

pub mod metadata;

pub use metadata::Metadata;

/// Prefix required on every plugin executable name.
pub const NAME_PREFIX: &str = "docker-";

/// Hidden subcommand every plugin must implement to report its metadata.
pub const METADATA_SUBCOMMAND: &str = "docker-cli-plugin-metadata";

/// Pattern a plugin name (executable name minus prefix and suffix) must match.
pub const PLUGIN_NAME_PATTERN: &str = "^[a-z][a-z0-9]*$";

/// The executable suffix plugin files carry on this platform.
///
/// `".exe"` on Windows, empty elsewhere.
pub fn exe_suffix() -> &'static str {
    std::env::consts::EXE_SUFFIX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_subcommand_carries_prefix() {
        assert!(METADATA_SUBCOMMAND.starts_with(NAME_PREFIX));
    }

    #[cfg(unix)]
    #[test]
    fn test_exe_suffix_empty_on_unix() {
        assert_eq!(exe_suffix(), "");
    }

    #[cfg(windows)]
    #[test]
    fn test_exe_suffix_on_windows() {
        assert_eq!(exe_suffix(), ".exe");
    }
}
