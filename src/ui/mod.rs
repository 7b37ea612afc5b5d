//! Interactive script picker drawn with ratatui

pub mod app;
pub mod browser;

pub use app::{App, Mode, Notice};
pub use browser::FolderBrowser;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;

use crate::scripts::{LauncherController, Spawner};

const ABOUT_TEXT: &str = "Lists the .sh files in a folder and opens the one you pick\n\
in the first terminal emulator found on this machine.";

/// Black background style
fn black_bg() -> Style {
    Style::default().bg(Color::Black)
}

/// Run the interactive picker until the user quits
pub fn run<S: Spawner>(controller: LauncherController<S>, dir: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(controller, dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<S: Spawner>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
}

fn draw<S: Spawner>(f: &mut Frame, app: &App<S>) {
    // Fill with black background
    let area = f.size();
    f.render_widget(Block::default().style(black_bg()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Folder line
            Constraint::Min(5),    // Script list
            Constraint::Length(3), // Help bar
            Constraint::Length(1), // Message bar
        ])
        .split(area);

    draw_folder_line(f, app, chunks[0]);
    draw_script_list(f, app, chunks[1]);
    draw_help_bar(f, &app.mode, app.notice().is_some(), chunks[2]);

    if let Some((ref msg, is_error)) = app.status {
        let color = if is_error { Color::Red } else { Color::Green };
        f.render_widget(Paragraph::new(msg.as_str()).style(Style::default().fg(color)), chunks[3]);
    }

    match &app.mode {
        Mode::Folders(browser) => draw_folder_picker(f, browser),
        Mode::About => {
            let body = format!("scriptlauncher {}\n\n{}", env!("CARGO_PKG_VERSION"), ABOUT_TEXT);
            draw_popup(f, "About", &body, Color::Cyan);
        }
        _ => {}
    }

    // Notices sit on top of everything else
    if let Some(notice) = app.notice() {
        draw_popup(f, &notice.title, &notice.body, Color::Red);
    }
}

fn draw_folder_line<S: Spawner>(f: &mut Frame, app: &App<S>, area: Rect) {
    let editing = matches!(app.mode, Mode::EditPath { .. });
    let (border, text) = if editing {
        (Color::Yellow, format!("{}▏", app.path_input))
    } else {
        (Color::Cyan, app.path_input.clone())
    };

    let folder = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("📁 Folder")
            .border_style(Style::default().fg(border))
            .style(black_bg()),
    );
    f.render_widget(folder, area);
}

fn draw_script_list<S: Spawner>(f: &mut Frame, app: &App<S>, area: Rect) {
    let items: Vec<ListItem> = app
        .scripts()
        .iter()
        .map(|name| {
            ListItem::new(Line::from(vec![
                Span::styled("📄 ", Style::default().fg(Color::Yellow)),
                Span::styled(name.as_str(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let title = match app.controller.current_directory() {
        Some(dir) => format!("Scripts ({}) in {}", app.scripts().len(), dir.display()),
        None => "Scripts".to_string(),
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Yellow))
                .style(black_bg()),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    if !app.scripts().is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Key hints shown in the help bar for each mode
fn help_keys(mode: &Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::EditPath { .. } => &[("Enter", " Scan  "), ("Esc", " Cancel")],
        Mode::Folders(_) => &[
            ("↑/↓/j/k", " Navigate  "),
            ("Enter/→", " Open  "),
            ("Backspace/←", " Parent  "),
            ("Space/c", " Choose  "),
            ("Esc", " Cancel"),
        ],
        Mode::About => &[("Enter", " Close")],
        Mode::Browse => &[
            ("↑/↓/j/k", " Navigate  "),
            ("Enter/x", " Run  "),
            ("o", " Open folder  "),
            ("/", " Edit path  "),
            ("F5", " Scan  "),
            ("R", " Refresh  "),
            ("s", " Save default  "),
            ("r", " Recover default  "),
            ("a", " About  "),
            ("q", " Quit"),
        ],
    }
}

fn draw_help_bar(f: &mut Frame, mode: &Mode, has_notice: bool, area: Rect) {
    let keys: &[(&str, &str)] = if has_notice {
        &[("Enter", " Close")]
    } else {
        help_keys(mode)
    };

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::default().fg(Color::Green)),
                Span::raw(*label),
            ]
        })
        .collect();
    let help = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).style(black_bg()));
    f.render_widget(help, area);
}

fn draw_popup(f: &mut Frame, title: &str, body: &str, color: Color) {
    let area = centered_rect(60, 30, f.size());
    f.render_widget(Clear, area);

    let popup = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .style(black_bg()),
        );
    f.render_widget(popup, area);
}

fn draw_folder_picker(f: &mut Frame, browser: &FolderBrowser) {
    let area = centered_rect(70, 60, f.size());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let items: Vec<ListItem> = browser
        .entries
        .iter()
        .map(|name| {
            ListItem::new(Line::from(vec![
                Span::styled("📁 ", Style::default().fg(Color::Cyan)),
                Span::styled(name.as_str(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(browser.current.display().to_string())
                .border_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(black_bg()),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    if !browser.entries.is_empty() {
        state.select(Some(browser.selected));
    }
    f.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(ref msg) = browser.message {
        f.render_widget(
            Paragraph::new(msg.as_str()).style(black_bg().fg(Color::Red)),
            chunks[1],
        );
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
