mod args;

pub use args::{Args, Commands, parse_args};
use anyhow::{Result, bail};
use colored::*;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::PreferenceStore;
use crate::error::LauncherError;
use crate::scripts::{LauncherController, TerminalCandidate, TerminalDispatcher};

/// Dispatch the parsed command line
pub fn run(args: Args) -> Result<()> {
    let store = match &args.config {
        Some(path) => PreferenceStore::new(path),
        None => PreferenceStore::open_default()?,
    };
    debug!("Using preferences file {}", store.path().display());

    let controller = LauncherController::new(store, TerminalDispatcher::new());

    match args.command {
        None => crate::ui::run(controller, None),
        Some(Commands::Ui { dir }) => crate::ui::run(controller, dir),
        Some(Commands::List { dir }) => list_scripts(controller, dir),
        Some(Commands::Run { script, dir }) => run_script(controller, &script, dir),
        Some(Commands::SetDefault { dir }) => set_default(&controller, &dir),
        Some(Commands::GetDefault) => get_default(&controller),
        Some(Commands::Terminals) => show_terminals(controller.dispatcher().candidates()),
    }
}

/// Print an error from any command, with details for launcher errors
pub fn print_error(err: &anyhow::Error) {
    match err.downcast_ref::<LauncherError>() {
        Some(launcher_err) => {
            eprintln!("{} {}", "❌".red(), launcher_err.title().red().bold());
            eprintln!("   {}", launcher_err);
            if let LauncherError::NoTerminalAvailable { attempts } = launcher_err {
                for attempt in attempts {
                    eprintln!("   • {}: {}", attempt.program, attempt.reason);
                }
            }
        }
        None => eprintln!("{} {:#}", "❌ Error:".red().bold(), err),
    }
}

/// Explicit folder, or the saved default when none was given
fn resolve_dir(controller: &LauncherController, dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir);
    }
    let default = controller.default_directory();
    if default.is_empty() {
        bail!("No folder given and no default folder saved (see `scriptlauncher set-default`)");
    }
    Ok(PathBuf::from(default))
}

fn list_scripts(mut controller: LauncherController, dir: Option<PathBuf>) -> Result<()> {
    let dir = resolve_dir(&controller, dir)?;
    for name in controller.open_directory(&dir)? {
        println!("{}", name);
    }
    Ok(())
}

fn run_script(mut controller: LauncherController, script: &str, dir: Option<PathBuf>) -> Result<()> {
    let outcome = if script.contains(std::path::MAIN_SEPARATOR) {
        controller.dispatcher().launch(script)?
    } else {
        let dir = resolve_dir(&controller, dir)?;
        controller.open_directory(&dir)?;
        controller.run_script(script)?
    };

    println!(
        "{} {} in {} (pid {})",
        "▶".green(),
        script.bold(),
        outcome.terminal.program.cyan(),
        outcome.pid
    );
    Ok(())
}

fn set_default(controller: &LauncherController, dir: &Path) -> Result<()> {
    let Some(dir) = dir.to_str() else {
        bail!("Folder path is not valid UTF-8: {}", dir.display());
    };
    controller.save_default_directory(dir)?;
    println!("{} Default folder saved: {}", "✔".green(), dir);
    Ok(())
}

fn get_default(controller: &LauncherController) -> Result<()> {
    let default = controller.default_directory();
    if default.is_empty() {
        println!("{}", "<not set>".dimmed());
    } else {
        println!("{}", default);
    }
    println!("\nConfig file: {}", controller.store().path().display());
    Ok(())
}

fn show_terminals(candidates: &[TerminalCandidate]) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Terminal", "Exec flag", "On PATH"]);
    for (i, candidate) in candidates.iter().enumerate() {
        let found = if is_on_path(&candidate.program) { "yes" } else { "no" };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&candidate.program),
            Cell::new(&candidate.exec_flag),
            Cell::new(found),
        ]);
    }
    println!("{}", table);
    Ok(())
}

/// Whether an executable with this name exists in one of the PATH folders
fn is_on_path(program: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}
