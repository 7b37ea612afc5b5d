use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "List the shell scripts in a folder and open them in a terminal emulator",
    long_about = "scriptlauncher lists the .sh files found in a folder and runs the one you pick\n\
inside the first terminal emulator available on this machine.\n\
Without a subcommand it opens the interactive UI on the saved default folder.\n\
---\n\
Examples:\n\
  scriptlauncher                             # Interactive UI on the default folder\n\
  scriptlauncher ui ~/bin                    # Interactive UI on ~/bin\n\
  scriptlauncher list ~/bin                  # Print the scripts in ~/bin\n\
  scriptlauncher run backup.sh               # Run backup.sh from the default folder\n\
  scriptlauncher set-default ~/bin           # Remember ~/bin for next time\n\
  scriptlauncher terminals                   # Show the terminal emulators that are tried"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Preferences file to use instead of the platform default
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable development mode - writes internal logs to a file, even in UI mode
    #[arg(long, global = true)]
    pub dev: bool,

    /// Verbosity level for debug output
    #[arg(short, long, default_value = "0", global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive script picker
    #[command(name = "ui")]
    Ui {
        /// Folder to open instead of the saved default
        dir: Option<PathBuf>,
    },
    /// Print the scripts found in a folder
    #[command(name = "list")]
    List {
        /// Folder to scan (defaults to the saved default folder)
        dir: Option<PathBuf>,
    },
    /// Open a script in a terminal emulator
    #[command(name = "run")]
    Run {
        /// Script name from the folder, or a path to a script
        script: String,
        /// Folder containing the script (defaults to the saved default folder)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Save the default folder
    #[command(name = "set-default")]
    SetDefault {
        /// Folder to remember
        dir: PathBuf,
    },
    /// Show the saved default folder
    #[command(name = "get-default")]
    GetDefault,
    /// List the terminal emulators that are tried, in order
    #[command(name = "terminals")]
    Terminals,
}

pub fn parse_args() -> Args {
    Args::parse()
}

impl Args {
    /// True when the run ends up in the interactive UI
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Ui { .. }))
    }
}
