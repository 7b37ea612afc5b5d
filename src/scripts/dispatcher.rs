//! Terminal dispatcher - opens a script in the first terminal emulator that starts

use std::cell::RefCell;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tracing::{debug, info, warn};

use crate::error::{FailedAttempt, LauncherError, Result};

/// Shell used to interpret every launched script.
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Terminals tried by default, highest priority first.
pub const DEFAULT_TERMINALS: &[(&str, &str)] = &[
    ("x-terminal-emulator", "-e"), // Debian alternatives
    ("gnome-terminal", "--"),
    ("konsole", "-e"),
    ("xfce4-terminal", "-e"),
    ("lxterminal", "-e"),
    ("mate-terminal", "-e"),
    ("xterm", "-e"),
    ("urxvt", "-e"),
];

/// A terminal emulator and the flag that makes it run a trailing command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalCandidate {
    pub program: String,
    pub exec_flag: String,
}

impl TerminalCandidate {
    pub fn new(program: impl Into<String>, exec_flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            exec_flag: exec_flag.into(),
        }
    }

    /// The built-in candidate table as owned values
    pub fn defaults() -> Vec<Self> {
        DEFAULT_TERMINALS
            .iter()
            .map(|(program, flag)| Self::new(*program, *flag))
            .collect()
    }
}

/// Fully resolved process invocation for one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl LaunchCommand {
    fn new(candidate: &TerminalCandidate, shell: &Path, script: &Path) -> Self {
        Self {
            program: candidate.program.clone(),
            args: vec![
                OsString::from(&candidate.exec_flag),
                shell.as_os_str().to_os_string(),
                script.as_os_str().to_os_string(),
            ],
        }
    }
}

/// Creates OS processes. Only process creation is observed, never completion.
#[cfg_attr(test, mockall::automock)]
pub trait Spawner {
    /// Start `command` and return the child's pid
    fn spawn(&self, command: &LaunchCommand) -> io::Result<u32>;
}

/// Spawner backed by `std::process::Command`.
///
/// Children are never waited on. Their handles are kept so that the ones
/// which already exited can be reaped with `try_wait` on the next spawn
/// instead of lingering as zombies.
#[derive(Debug, Default)]
pub struct ProcessSpawner {
    children: RefCell<Vec<Child>>,
}

impl ProcessSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the handles of children that have exited; returns how many remain
    pub fn reap_finished(&self) -> usize {
        let mut children = self.children.borrow_mut();
        children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!("Reaped terminal process {} ({})", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("Failed to poll terminal process {}: {}", child.id(), e);
                false
            }
        });
        children.len()
    }
}

impl Spawner for ProcessSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<u32> {
        self.reap_finished();

        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let pid = child.id();
        self.children.borrow_mut().push(child);
        Ok(pid)
    }
}

/// Result of a successful launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub terminal: TerminalCandidate,
    pub pid: u32,
    /// Candidates that failed before `terminal` started
    pub skipped: Vec<FailedAttempt>,
}

/// Walks an ordered terminal table and stops at the first one that starts
#[derive(Debug, Clone)]
pub struct TerminalDispatcher<S: Spawner = ProcessSpawner> {
    candidates: Vec<TerminalCandidate>,
    shell: PathBuf,
    spawner: S,
}

impl TerminalDispatcher<ProcessSpawner> {
    /// Dispatcher with the built-in terminal table and real processes
    pub fn new() -> Self {
        Self::with_spawner(TerminalCandidate::defaults(), ProcessSpawner::new())
    }

    /// Real processes, custom terminal table
    pub fn with_candidates(candidates: Vec<TerminalCandidate>) -> Self {
        Self::with_spawner(candidates, ProcessSpawner::new())
    }
}

impl Default for TerminalDispatcher<ProcessSpawner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Spawner> TerminalDispatcher<S> {
    pub fn with_spawner(candidates: Vec<TerminalCandidate>, spawner: S) -> Self {
        Self {
            candidates,
            shell: PathBuf::from(DEFAULT_SHELL),
            spawner,
        }
    }

    /// Override the interpreter passed to the terminal
    pub fn shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn candidates(&self) -> &[TerminalCandidate] {
        &self.candidates
    }

    pub fn shell_path(&self) -> &Path {
        &self.shell
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Open `script` in the first terminal that can be started.
    ///
    /// Every candidate is tried at most once, in table order. Spawn errors
    /// are logged and skipped; only when the whole table is exhausted does
    /// this return `NoTerminalAvailable`.
    pub fn launch(&self, script: impl AsRef<Path>) -> Result<LaunchOutcome> {
        let script = script.as_ref();
        let mut skipped = Vec::new();

        for candidate in &self.candidates {
            let command = LaunchCommand::new(candidate, &self.shell, script);
            debug!("Trying terminal {} {:?}", command.program, command.args);

            match self.spawner.spawn(&command) {
                Ok(pid) => {
                    info!(
                        "Detected terminal: {} (pid {}) for {}",
                        candidate.program,
                        pid,
                        script.display()
                    );
                    return Ok(LaunchOutcome {
                        terminal: candidate.clone(),
                        pid,
                        skipped,
                    });
                }
                Err(e) => {
                    warn!("Terminal not found '{}': {}", candidate.program, e);
                    skipped.push(FailedAttempt {
                        program: candidate.program.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        warn!("No terminal found for {}", script.display());
        Err(LauncherError::NoTerminalAvailable { attempts: skipped })
    }
}
