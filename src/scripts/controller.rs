//! Launcher controller - the state shared by every front-end action

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::dispatcher::{LaunchOutcome, ProcessSpawner, Spawner, TerminalDispatcher};
use super::scanner;
use crate::config::PreferenceStore;
use crate::error::{LauncherError, Result};

/// Owns the current folder and the script list derived from it.
///
/// Both only change together, after a successful scan, so the list never
/// holds entries from a folder other than `current_directory`.
pub struct LauncherController<S: Spawner = ProcessSpawner> {
    store: PreferenceStore,
    dispatcher: TerminalDispatcher<S>,
    current_directory: Option<PathBuf>,
    scripts: Vec<String>,
}

impl<S: Spawner> LauncherController<S> {
    pub fn new(store: PreferenceStore, dispatcher: TerminalDispatcher<S>) -> Self {
        Self {
            store,
            dispatcher,
            current_directory: None,
            scripts: Vec::new(),
        }
    }

    /// Load the saved default folder and scan it when one is set.
    ///
    /// Returns the default (possibly empty) even when the scan fails, so the
    /// caller can still show it in the path field.
    pub fn startup(&mut self) -> (String, Result<()>) {
        let default_directory = self.store.load_default_directory();
        if default_directory.is_empty() {
            debug!("No default directory configured");
            return (default_directory, Ok(()));
        }
        let scanned = self.open_directory(&default_directory).map(|_| ());
        (default_directory, scanned)
    }

    /// Scan `path` and make it current. On failure the previous state stays.
    pub fn open_directory(&mut self, path: impl AsRef<Path>) -> Result<&[String]> {
        let path = path.as_ref();
        let scripts = scanner::scan(path)?;
        info!("Listing {} scripts from {}", scripts.len(), path.display());
        self.current_directory = Some(path.to_path_buf());
        self.scripts = scripts;
        Ok(&self.scripts)
    }

    /// Scan the current folder again; a no-op when none is open
    pub fn rescan(&mut self) -> Result<&[String]> {
        match self.current_directory.clone() {
            Some(dir) => self.open_directory(dir),
            None => Ok(&self.scripts),
        }
    }

    pub fn current_directory(&self) -> Option<&Path> {
        self.current_directory.as_deref()
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    /// Full path of a listed script
    pub fn script_path(&self, name: &str) -> Option<PathBuf> {
        let dir = self.current_directory.as_ref()?;
        self.scripts
            .iter()
            .any(|s| s == name)
            .then(|| dir.join(name))
    }

    /// Launch a script from the current list in a terminal
    pub fn run_script(&self, name: &str) -> Result<LaunchOutcome> {
        let path = self
            .script_path(name)
            .ok_or_else(|| LauncherError::ScriptNotListed(name.to_string()))?;
        self.dispatcher.launch(path)
    }

    pub fn default_directory(&self) -> String {
        self.store.load_default_directory()
    }

    pub fn save_default_directory(&self, path: &str) -> Result<()> {
        self.store.save_default_directory(path)
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    pub fn dispatcher(&self) -> &TerminalDispatcher<S> {
        &self.dispatcher
    }
}
