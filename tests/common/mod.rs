//! Shared helpers for the integration tests
//!
//! - Folders pre-populated with files
//! - Fake "terminal" executables for the dispatcher

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary folder containing empty files with the given names
pub fn dir_with_files(names: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create test directory");
    for name in names {
        fs::write(dir.path().join(name), "#!/bin/sh\necho test\n")
            .unwrap_or_else(|_| panic!("Failed to create fixture file: {}", name));
    }
    dir
}

/// Write an executable shell script that exits straight away
#[cfg(unix)]
pub fn fake_terminal(dir: &Path, name: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\nexit 0\n").expect("Failed to write fake terminal");
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Absolute path inside `dir` that is guaranteed not to exist
pub fn missing_program(dir: &Path, name: &str) -> String {
    dir.join("not-installed").join(name).display().to_string()
}
