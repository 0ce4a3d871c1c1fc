//! Candidate listing against a real directory layout
//!
//! Populates several directories with shadowed and bogus/obscure plugin
//! candidates. No file contents are needed and permissions are irrelevant:
//! listing never executes anything.

#![cfg(unix)]

use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use cliplugins_core::manager::list_candidates;
use tempfile::TempDir;

fn touch(path: &Path) {
    fs::write(path, "").unwrap();
}

fn populate(root: &Path) {
    let p1 = root.join("plugins1");
    fs::create_dir(&p1).unwrap();
    touch(&p1.join("docker-plugin1")); // appears in each directory
    touch(&p1.join("not-a-plugin"));
    touch(&p1.join("docker-symlinked1"));
    symlink("docker-symlinked1", p1.join("docker-symlinked2")).unwrap();
    fs::create_dir(p1.join("ignored1")).unwrap();

    let p2 = root.join("plugins2");
    fs::create_dir(&p2).unwrap();
    touch(&p2.join("docker-plugin1"));
    touch(&p2.join("also-not-a-plugin"));
    touch(&p2.join("docker-hardlink1"));
    fs::hard_link(p2.join("docker-hardlink1"), p2.join("docker-hardlink2")).unwrap();
    fs::create_dir(p2.join("ignored2")).unwrap();

    let p3 = root.join("plugins3");
    fs::create_dir(&p3).unwrap();
    touch(&p3.join("docker-plugin1"));
    fs::create_dir(p3.join("ignored3")).unwrap();
    symlink("broken", p3.join("docker-brokensymlink")).unwrap();
    touch(&p3.join("non-plugin-symlinked"));
    symlink("non-plugin-symlinked", p3.join("docker-symlinked")).unwrap();

    // a plain file where a directory is expected
    touch(&root.join("plugins4"));
}

fn dirs(root: &Path, names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|d| root.join(d)).collect()
}

#[test]
fn list_groups_by_name_in_priority_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    populate(root);

    let candidates = list_candidates(
        &dirs(
            root,
            &["plugins1", "nonexistent", "plugins2", "plugins3", "plugins4"],
        ),
        "",
    )
    .unwrap();

    let expected: BTreeMap<String, Vec<PathBuf>> = [
        (
            "plugin1",
            vec![
                root.join("plugins1/docker-plugin1"),
                root.join("plugins2/docker-plugin1"),
                root.join("plugins3/docker-plugin1"),
            ],
        ),
        ("symlinked1", vec![root.join("plugins1/docker-symlinked1")]),
        ("symlinked2", vec![root.join("plugins1/docker-symlinked2")]),
        ("hardlink1", vec![root.join("plugins2/docker-hardlink1")]),
        ("hardlink2", vec![root.join("plugins2/docker-hardlink2")]),
        ("brokensymlink", vec![root.join("plugins3/docker-brokensymlink")]),
        ("symlinked", vec![root.join("plugins3/docker-symlinked")]),
    ]
    .into_iter()
    .map(|(name, paths)| (name.to_string(), paths))
    .collect();

    assert_eq!(candidates, expected);
}

#[test]
fn directory_order_decides_priority() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    populate(root);

    let candidates =
        list_candidates(&dirs(root, &["plugins3", "plugins2", "plugins1"]), "").unwrap();

    assert_eq!(
        candidates["plugin1"],
        vec![
            root.join("plugins3/docker-plugin1"),
            root.join("plugins2/docker-plugin1"),
            root.join("plugins1/docker-plugin1"),
        ]
    );
}

#[test]
fn skipped_dirs_do_not_change_result() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    populate(root);

    let plain = list_candidates(&dirs(root, &["plugins1", "plugins2"]), "").unwrap();
    let noisy = list_candidates(
        &dirs(
            root,
            &["missing", "plugins1", "plugins4", "plugins2", "also-missing"],
        ),
        "",
    )
    .unwrap();

    assert_eq!(plain, noisy);
}

#[test]
fn unreadable_dir_aborts_scan() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let locked = tmp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // privileged users read it anyway, nothing to test then
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = list_candidates(&[locked.clone()], "");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let err = result.unwrap_err();
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("locked"));
}
