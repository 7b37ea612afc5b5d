// Re-export modules so they can be used from tests
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod scripts;
pub mod ui;

pub use error::{FailedAttempt, LauncherError};
