//! Directory scanning for plugin candidates

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cliplugins_api::NAME_PREFIX;
use tracing::debug;

use super::error::ManagerError;

/// Plugin name to candidate paths, each list in descending priority.
pub type CandidateMap = BTreeMap<String, Vec<PathBuf>>;

/// Scan `dirs` (highest priority first) for plugin candidates.
///
/// Only file names are inspected; nothing is opened or executed. Entries
/// must be regular files or symlinks (dangling ones included) whose name
/// carries the plugin prefix and `exe_suffix`. Directories that do not
/// exist, or are not directories, are skipped.
pub fn list_candidates(dirs: &[PathBuf], exe_suffix: &str) -> Result<CandidateMap, ManagerError> {
    let mut result = CandidateMap::new();
    for dir in dirs {
        add_candidates_from_dir(&mut result, dir, exe_suffix)?;
    }
    Ok(result)
}

fn add_candidates_from_dir(
    result: &mut CandidateMap,
    dir: &Path,
    exe_suffix: &str,
) -> Result<(), ManagerError> {
    let read_dir_err = |source: io::Error| ManagerError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if is_absent(&e) => {
            debug!(dir = %dir.display(), "Plugin directory not present, skipping");
            return Ok(());
        }
        Err(e) => return Err(read_dir_err(e)),
    };

    let mut entries = entries
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_err)?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let file_type = entry.file_type().map_err(read_dir_err)?;
        if !(file_type.is_file() || file_type.is_symlink()) {
            continue;
        }

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some(name) = plugin_name_from_file_name(file_name, exe_suffix) else {
            continue;
        };

        debug!(plugin = %name, path = %entry.path().display(), "Found plugin candidate");
        result
            .entry(name.to_string())
            .or_default()
            .push(dir.join(file_name));
    }

    Ok(())
}

/// Derive the plugin name from an executable file name.
///
/// Strips `exe_suffix` and then the plugin prefix; `None` if either is
/// missing. The result is not checked against the naming pattern.
pub fn plugin_name_from_file_name<'a>(file_name: &'a str, exe_suffix: &str) -> Option<&'a str> {
    file_name
        .strip_suffix(exe_suffix)?
        .strip_prefix(NAME_PREFIX)
}

/// Whether an I/O error means the path is simply not there to look at.
pub(crate) fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plugin_name_from_file_name() {
        assert_eq!(plugin_name_from_file_name("docker-foo", ""), Some("foo"));
        assert_eq!(plugin_name_from_file_name("docker-123", ""), Some("123"));
        assert_eq!(plugin_name_from_file_name("not-a-plugin", ""), None);
        assert_eq!(plugin_name_from_file_name("docker-foo.exe", ".exe"), Some("foo"));
        assert_eq!(plugin_name_from_file_name("docker-foo", ".exe"), None);
        assert_eq!(plugin_name_from_file_name("foo.exe", ".exe"), None);
    }

    #[test]
    fn test_empty_dir_list() {
        assert!(list_candidates(&[], "").unwrap().is_empty());
    }

    #[test]
    fn test_missing_and_file_dirs_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plugins-file");
        fs::write(&file, "").unwrap();

        let dirs = vec![tmp.path().join("nonexistent"), file];
        assert!(list_candidates(&dirs, "").unwrap().is_empty());
    }

    #[test]
    fn test_nested_directories_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("docker-adir")).unwrap();
        fs::write(tmp.path().join("docker-afile"), "").unwrap();

        let candidates = list_candidates(&[tmp.path().to_path_buf()], "").unwrap();
        assert_eq!(candidates.keys().collect::<Vec<_>>(), vec!["afile"]);
    }

    #[test]
    fn test_suffix_required_when_configured() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("docker-win.exe"), "").unwrap();
        fs::write(tmp.path().join("docker-nosuffix"), "").unwrap();

        let candidates = list_candidates(&[tmp.path().to_path_buf()], ".exe").unwrap();
        assert_eq!(
            candidates.get("win"),
            Some(&vec![tmp.path().join("docker-win.exe")])
        );
        assert!(!candidates.contains_key("nosuffix"));
    }

    #[test]
    fn test_names_not_matching_pattern_are_still_candidates() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("docker-Bad_Name"), "").unwrap();

        let candidates = list_candidates(&[tmp.path().to_path_buf()], "").unwrap();
        assert!(candidates.contains_key("Bad_Name"));
    }
}
