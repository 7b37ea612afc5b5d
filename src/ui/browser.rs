//! Folder picker - walks sub-folders starting from the home directory

use directories::UserDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::scripts::scanner::sort_case_insensitive;

/// Home directory, or `/` when it cannot be determined
pub fn home_dir() -> PathBuf {
    UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/"))
}

/// Visible sub-folders of `dir`, sorted like the script list
fn list_subfolders(dir: &Path) -> io::Result<Vec<String>> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.starts_with('.') && entry.path().is_dir() {
            folders.push(name);
        }
    }
    sort_case_insensitive(&mut folders);
    Ok(folders)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderBrowser {
    pub current: PathBuf,
    pub entries: Vec<String>,
    pub selected: usize,
    /// Last navigation error, shown inside the picker
    pub message: Option<String>,
}

impl FolderBrowser {
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let current = dir.into();
        let entries = list_subfolders(&current)?;
        Ok(Self {
            current,
            entries,
            selected: 0,
            message: None,
        })
    }

    pub fn selected_folder(&self) -> Option<&str> {
        self.entries.get(self.selected).map(String::as_str)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected < self.entries.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Descend into the highlighted sub-folder
    pub fn enter_selected(&mut self) {
        let Some(name) = self.selected_folder() else {
            return;
        };
        let target = self.current.join(name);
        self.go_to(target, None);
    }

    /// Move up one level, keeping the folder we came from highlighted
    pub fn go_parent(&mut self) {
        let Some(parent) = self.current.parent().map(Path::to_path_buf) else {
            return;
        };
        let came_from = self
            .current
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string);
        self.go_to(parent, came_from);
    }

    fn go_to(&mut self, target: PathBuf, highlight: Option<String>) {
        match list_subfolders(&target) {
            Ok(entries) => {
                self.selected = highlight
                    .and_then(|name| entries.iter().position(|e| *e == name))
                    .unwrap_or(0);
                self.entries = entries;
                self.current = target;
                self.message = None;
            }
            Err(e) => self.message = Some(format!("{}: {}", target.display(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        for sub in ["beta", "Alpha", ".hidden"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        fs::write(dir.path().join("run.sh"), "").unwrap();
        dir
    }

    #[test]
    fn lists_visible_folders_only() {
        let dir = tree();
        let browser = FolderBrowser::open(dir.path()).unwrap();
        assert_eq!(browser.entries, vec!["Alpha", "beta"]);
    }

    #[test]
    fn enter_and_return_to_parent() {
        let dir = tree();
        fs::create_dir(dir.path().join("beta").join("deeper")).unwrap();
        let mut browser = FolderBrowser::open(dir.path()).unwrap();

        browser.move_down();
        browser.enter_selected();
        assert_eq!(browser.current, dir.path().join("beta"));
        assert_eq!(browser.entries, vec!["deeper"]);

        browser.go_parent();
        assert_eq!(browser.current, dir.path());
        assert_eq!(browser.selected_folder(), Some("beta"));
    }

    #[test]
    fn failed_navigation_keeps_position() {
        let dir = tree();
        let mut browser = FolderBrowser::open(dir.path()).unwrap();
        fs::remove_dir(dir.path().join("Alpha")).unwrap();

        browser.enter_selected();
        assert_eq!(browser.current, dir.path());
        assert!(browser.message.is_some());
    }

    #[test]
    fn missing_start_folder_is_an_error() {
        let dir = tree();
        assert!(FolderBrowser::open(dir.path().join("nope")).is_err());
    }
}
