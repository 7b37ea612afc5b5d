//! Scripts module for finding and launching shell scripts
//!
//! This module provides:
//! - Directory scanning for `.sh` files
//! - Terminal emulator discovery and script launching
//! - The controller that keeps the current folder and its script list together

pub mod controller;
pub mod dispatcher;
pub mod scanner;

pub use controller::LauncherController;
pub use dispatcher::{
    LaunchCommand, LaunchOutcome, ProcessSpawner, Spawner, TerminalCandidate, TerminalDispatcher,
    DEFAULT_SHELL, DEFAULT_TERMINALS,
};
pub use scanner::{scan, SCRIPT_SUFFIX};
