//! Launcher UI state - key handling kept apart from drawing so it can be tested

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::mem;
use std::path::PathBuf;
use tracing::debug;

use super::browser::{home_dir, FolderBrowser};
use crate::error::LauncherError;
use crate::scripts::{LauncherController, ProcessSpawner, Spawner};

/// Blocking message shown over the UI until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl From<&LauncherError> for Notice {
    fn from(err: &LauncherError) -> Self {
        let mut body = err.to_string();
        if let LauncherError::NoTerminalAvailable { attempts } = err {
            for attempt in attempts {
                body.push_str(&format!("\n• {}: {}", attempt.program, attempt.reason));
            }
        }
        Self {
            title: err.title().to_string(),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    /// Typing a folder path; `original` is restored on cancel
    EditPath { original: String },
    /// Picking a folder by walking the tree
    Folders(FolderBrowser),
    About,
}

pub struct App<S: Spawner = ProcessSpawner> {
    pub controller: LauncherController<S>,
    pub path_input: String,
    pub selected: usize,
    pub mode: Mode,
    /// Pending notices, oldest first; the front one blocks all other keys
    pub notices: VecDeque<Notice>,
    /// (message, is_error)
    pub status: Option<(String, bool)>,
    /// Where the folder picker starts
    pub folder_start: PathBuf,
    pub should_quit: bool,
}

impl<S: Spawner> App<S> {
    /// Build the UI state and perform the initial scan.
    ///
    /// `dir` overrides the saved default folder.
    pub fn new(mut controller: LauncherController<S>, dir: Option<PathBuf>) -> Self {
        let mut notices = VecDeque::new();
        match controller.store().ensure_exists() {
            Ok(true) => notices.push_back(Notice {
                title: "Preferences created".to_string(),
                body: format!(
                    "The config file {} couldn't be found, a new one was created.",
                    controller.store().path().display()
                ),
            }),
            Ok(false) => {}
            Err(e) => notices.push_back(Notice::from(&e)),
        }

        let (path_input, scanned) = match dir {
            Some(dir) => {
                let scanned = controller.open_directory(&dir).map(|_| ());
                (dir.display().to_string(), scanned)
            }
            None => controller.startup(),
        };

        let mut app = Self {
            controller,
            path_input,
            selected: 0,
            mode: Mode::Browse,
            notices,
            status: None,
            folder_start: home_dir(),
            should_quit: false,
        };
        if let Err(e) = scanned {
            app.notify(&e);
        }
        app
    }

    pub fn scripts(&self) -> &[String] {
        self.controller.scripts()
    }

    pub fn selected_script(&self) -> Option<&str> {
        self.scripts().get(self.selected).map(String::as_str)
    }

    /// Notice currently blocking the UI
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    fn notify(&mut self, err: &LauncherError) {
        debug!("Showing notice: {}", err);
        self.notices.push_back(Notice::from(err));
    }

    fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn move_down(&mut self) {
        if self.selected < self.scripts().len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Scan whatever is in the path field
    pub fn scan_path_input(&mut self) {
        let path = self.path_input.trim().to_string();
        if path.is_empty() {
            self.status = Some(("Enter a folder path first".to_string(), true));
            return;
        }
        match self.controller.open_directory(&path) {
            Ok(scripts) => {
                self.status = Some((format!("{} scripts in {}", scripts.len(), path), false));
                self.selected = 0;
            }
            Err(e) => self.notify(&e),
        }
    }

    /// Scan the current folder again, ignoring unsaved edits to the path field
    pub fn rescan(&mut self) {
        match self.controller.rescan() {
            Ok(scripts) => {
                let count = scripts.len();
                self.selected = self.selected.min(count.saturating_sub(1));
                self.status = Some((format!("Refreshed: {} scripts", count), false));
            }
            Err(e) => self.notify(&e),
        }
    }

    pub fn run_selected(&mut self) {
        let Some(name) = self.selected_script().map(str::to_string) else {
            return;
        };
        match self.controller.run_script(&name) {
            Ok(outcome) => {
                self.status = Some((
                    format!("Opened {} in {}", name, outcome.terminal.program),
                    false,
                ));
            }
            Err(e) => self.notify(&e),
        }
    }

    pub fn save_default(&mut self) {
        let path = self.path_input.trim().to_string();
        match self.controller.save_default_directory(&path) {
            Ok(()) => self.status = Some(("New path saved".to_string(), false)),
            Err(e) => self.notify(&e),
        }
    }

    /// Put the saved default back into the path field (does not scan)
    pub fn recover_default(&mut self) {
        self.path_input = self.controller.default_directory();
        self.status = Some(("Default folder restored, press F5 to scan".to_string(), false));
    }

    /// Open the folder picker at `folder_start`
    pub fn open_folder_picker(&mut self) {
        match FolderBrowser::open(&self.folder_start) {
            Ok(browser) => self.mode = Mode::Folders(browser),
            Err(e) => self.notices.push_back(Notice {
                title: "Cannot open folder".to_string(),
                body: format!("{}: {}", self.folder_start.display(), e),
            }),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if !self.notices.is_empty() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.notices.pop_front();
            }
            return;
        }

        match mem::replace(&mut self.mode, Mode::Browse) {
            Mode::About => {}
            Mode::EditPath { original } => self.handle_edit_key(key, original),
            Mode::Folders(browser) => self.handle_folder_key(key, browser),
            Mode::Browse => self.handle_browse_key(key),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent, original: String) {
        match key.code {
            KeyCode::Enter => self.scan_path_input(),
            KeyCode::Esc => self.path_input = original,
            KeyCode::Backspace => {
                self.path_input.pop();
                self.mode = Mode::EditPath { original };
            }
            KeyCode::Char(c) => {
                self.path_input.push(c);
                self.mode = Mode::EditPath { original };
            }
            _ => self.mode = Mode::EditPath { original },
        }
    }

    fn handle_folder_key(&mut self, key: KeyEvent, mut browser: FolderBrowser) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return,
            KeyCode::Char(' ') | KeyCode::Char('c') => {
                self.path_input = browser.current.display().to_string();
                self.scan_path_input();
                return;
            }
            KeyCode::Up | KeyCode::Char('k') => browser.move_up(),
            KeyCode::Down | KeyCode::Char('j') => browser.move_down(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => browser.enter_selected(),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => browser.go_parent(),
            _ => {}
        }
        self.mode = Mode::Folders(browser);
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        self.status = None;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Enter | KeyCode::Char('x') => self.run_selected(),
            KeyCode::Char('o') => self.open_folder_picker(),
            KeyCode::Char('/') => {
                self.mode = Mode::EditPath {
                    original: self.path_input.clone(),
                };
            }
            KeyCode::F(5) => self.scan_path_input(),
            KeyCode::Char('R') => self.rescan(),
            KeyCode::Char('s') => self.save_default(),
            KeyCode::Char('r') => self.recover_default(),
            KeyCode::Char('a') => self.mode = Mode::About,
            _ => {}
        }
    }
}
