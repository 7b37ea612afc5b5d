use scriptlauncher::{cli, logging};

fn main() {
    // Parse command line arguments first to determine if we're using UI mode
    let args = cli::parse_args();

    let guard = match logging::init(args.verbosity, args.is_interactive(), args.dev) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("⚠️  {}", e);
            None
        }
    };

    let result = cli::run(args);

    // Flush dev-mode file logs before a possible exit
    drop(guard);

    if let Err(e) = result {
        cli::print_error(&e);
        std::process::exit(1);
    }
}
