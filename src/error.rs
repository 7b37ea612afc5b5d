use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A single failed spawn attempt, kept so callers can explain what was tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub program: String,
    pub reason: String,
}

/// Errors surfaced by the launcher core.
///
/// None of these are retried; the front end turns each one into a
/// notification the user has to acknowledge.
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("Directory not found: {}: {source}", path.display())]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No terminal emulator could be started ({} tried)", attempts.len())]
    NoTerminalAvailable { attempts: Vec<FailedAttempt> },

    #[error("Failed to write preferences to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Script '{0}' is not in the current list")]
    ScriptNotListed(String),
}

impl LauncherError {
    /// Short title used by the TUI notice and the CLI prefix.
    pub fn title(&self) -> &'static str {
        match self {
            Self::DirectoryNotFound { .. } => "Directory not found",
            Self::Scan { .. } => "Scan error",
            Self::NoTerminalAvailable { .. } => "No terminal available",
            Self::Persistence { .. } => "Could not save preferences",
            Self::ScriptNotListed(_) => "Unknown script",
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
