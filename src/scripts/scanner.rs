//! Directory scanner - lists the shell scripts found directly inside a folder

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::error::{LauncherError, Result};

/// Suffix a file name must end with (compared case-insensitively).
pub const SCRIPT_SUFFIX: &str = ".sh";

/// Check whether a file name looks like a shell script
pub fn is_script_name(name: &str) -> bool {
    name.to_lowercase().ends_with(SCRIPT_SUFFIX)
}

/// List the scripts directly inside `path`, sorted case-insensitively.
///
/// Only names are returned, with their original casing. A missing or
/// unreadable directory yields `DirectoryNotFound`; any other I/O failure
/// while enumerating yields `Scan` and no partial result.
pub fn scan(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let entries = fs::read_dir(path).map_err(|source| open_error(path, source))?;

    let mut scripts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LauncherError::Scan {
            path: path.to_path_buf(),
            source,
        })?;

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                debug!("Skipping non UTF-8 entry {:?} in {}", raw, path.display());
                continue;
            }
        };

        if is_script_name(&name) {
            scripts.push(name);
        }
    }

    sort_case_insensitive(&mut scripts);
    debug!("Found {} scripts in {}", scripts.len(), path.display());
    Ok(scripts)
}

/// Classify a failure to open the folder itself.
///
/// Missing and unreadable folders are both "not found"; everything else is a
/// scan error.
fn open_error(path: &Path, source: io::Error) -> LauncherError {
    match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            LauncherError::DirectoryNotFound { path: path.to_path_buf(), source }
        }
        _ => LauncherError::Scan { path: path.to_path_buf(), source },
    }
}

/// Sort names ignoring case; names equal up to case fall back to byte order.
pub fn sort_case_insensitive(names: &mut [String]) {
    names.sort_by_cached_key(|name| (name.to_lowercase(), name.clone()));
}
