use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result as AnyResult};
use directories::ProjectDirs;
use tracing::{debug, info, warn};

use crate::error::{LauncherError, Result};

/// Written when the preferences file is created for the first time.
const EMPTY_PREFERENCES: &str = "[Preferences]\ndefaultdirectory = \"\"\n";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(rename = "Preferences", default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Folder shown when the launcher starts
    #[serde(rename = "defaultdirectory", default)]
    pub default_directory: String,
}

/// Get the configuration file path
pub fn config_file_path() -> AnyResult<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "scriptlauncher")
        .context("Unable to determine project directories")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Preferences file on disk holding the default directory
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store backed by an explicit file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config location
    pub fn open_default() -> AnyResult<Self> {
        Ok(Self::new(config_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with an empty default if it is missing.
    ///
    /// Returns `true` when a new file was written.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.path.exists() {
            debug!("The config file {} was found", self.path.display());
            return Ok(false);
        }

        self.write_raw(EMPTY_PREFERENCES)?;
        info!("New config file created at {}", self.path.display());
        Ok(true)
    }

    /// Load the whole configuration; never fails.
    ///
    /// A file that cannot be created, read or parsed degrades to defaults.
    pub fn load(&self) -> Config {
        if let Err(e) = self.ensure_exists() {
            warn!("{}", e);
            return Config::default();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read config file {}: {}", self.path.display(), e);
                return Config::default();
            }
        };

        match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse config file ({}). Using defaults.", e);
                Config::default()
            }
        }
    }

    /// Persist the whole configuration
    pub fn save(&self, config: &Config) -> Result<()> {
        let content = toml::to_string_pretty(config).map_err(|e| LauncherError::Persistence {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;
        self.write_raw(&content)
    }

    /// The saved default directory, or `""` when none is set
    pub fn load_default_directory(&self) -> String {
        self.load().preferences.default_directory
    }

    pub fn save_default_directory(&self, directory: &str) -> Result<()> {
        let mut config = self.load();
        config.preferences.default_directory = directory.to_string();
        self.save(&config)?;
        info!("New path saved: {}", directory);
        Ok(())
    }

    fn write_raw(&self, content: &str) -> Result<()> {
        let persistence = |source| LauncherError::Persistence {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(persistence)?;
        }
        fs::write(&self.path, content).map_err(persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_load_creates_file_with_empty_default() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("nested").join("config.toml"));

        assert_eq!(store.load_default_directory(), "");
        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.starts_with("[Preferences]"));
        assert!(written.contains("defaultdirectory"));
    }

    #[test]
    fn ensure_exists_only_writes_once() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("config.toml"));
        assert!(store.ensure_exists().unwrap());
        assert!(!store.ensure_exists().unwrap());
    }

    #[test]
    fn missing_section_is_an_empty_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[Other]\nkey = \"value\"\n").unwrap();
        assert_eq!(PreferenceStore::new(path).load_default_directory(), "");
    }

    #[test]
    fn serialized_layout_uses_section_and_key() {
        let config = Config {
            preferences: Preferences { default_directory: "/srv/scripts".into() },
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[Preferences]"));
        assert!(text.contains("defaultdirectory = \"/srv/scripts\""));
    }
}
