mod common;

use common::dir_with_files;
use scriptlauncher::LauncherError;
use scriptlauncher::scripts::scan;
use std::fs;

#[test]
fn scan_filters_and_sorts_case_insensitively() {
    let dir = dir_with_files(&["B.sh", "a.SH", "c.txt"]);
    let scripts = scan(dir.path()).unwrap();
    assert_eq!(scripts, vec!["a.SH", "B.sh"]);
}

#[test]
fn scan_is_not_recursive() {
    let dir = dir_with_files(&["top.sh"]);
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("deep.sh"), "").unwrap();

    assert_eq!(scan(dir.path()).unwrap(), vec!["top.sh"]);
}

#[test]
fn empty_folder_gives_empty_list() {
    let dir = dir_with_files(&["readme.md"]);
    assert!(scan(dir.path()).unwrap().is_empty());
}

#[test]
fn missing_folder_is_directory_not_found() {
    let dir = dir_with_files(&[]);
    let missing = dir.path().join("does-not-exist");
    match scan(&missing) {
        Err(LauncherError::DirectoryNotFound { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected DirectoryNotFound, got {:?}", other),
    }
}

#[test]
fn file_instead_of_folder_is_a_scan_error() {
    let dir = dir_with_files(&["plain.sh"]);
    let result = scan(dir.path().join("plain.sh"));
    assert!(matches!(result, Err(LauncherError::Scan { .. })));
}

#[cfg(unix)]
#[test]
fn unreadable_folder_is_directory_not_found() {
    use std::os::unix::fs::PermissionsExt;

    let dir = dir_with_files(&[]);
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("inside.sh"), "").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores directory permissions, so there is nothing to check there
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = scan(&locked);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    match result {
        Err(err @ LauncherError::DirectoryNotFound { .. }) => {
            assert!(err.to_string().contains("denied"), "message was: {}", err);
        }
        other => panic!("expected DirectoryNotFound, got {:?}", other),
    }
}
