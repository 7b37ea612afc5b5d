use anyhow::Result;
use chrono::Local;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

/// Get the appropriate log level based on verbosity
pub fn get_log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Level actually used for a run.
///
/// The TUI owns the screen, so without `--dev` only errors are logged there.
pub fn effective_level(verbosity: u8, interactive: bool, dev: bool) -> Level {
    if interactive && !dev {
        Level::ERROR
    } else {
        get_log_level(verbosity)
    }
}

/// File name used for dev-mode logs
pub fn dev_log_file_name() -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("scriptlauncher_dev_{}.log", timestamp)
}

/// Install the global tracing subscriber.
///
/// In dev mode logs go to a timestamped file in the working directory and the
/// returned guard must be kept alive until exit so buffered lines are flushed.
pub fn init(verbosity: u8, interactive: bool, dev: bool) -> Result<Option<WorkerGuard>> {
    let level = effective_level(verbosity, interactive, dev);

    if dev {
        let log_file_path = dev_log_file_name();
        println!("🔍 Development mode enabled. Logs will be written to: {}", log_file_path);

        let file_appender = tracing_appender::rolling::never("", &log_file_path);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(non_blocking)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
        return Ok(Some(guard));
    }

    fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(get_log_level(0), Level::ERROR);
        assert_eq!(get_log_level(2), Level::INFO);
        assert_eq!(get_log_level(9), Level::TRACE);
    }

    #[test]
    fn tui_without_dev_only_logs_errors() {
        assert_eq!(effective_level(3, true, false), Level::ERROR);
        assert_eq!(effective_level(3, true, true), Level::DEBUG);
        assert_eq!(effective_level(1, false, false), Level::WARN);
    }

    #[test]
    fn dev_log_name_shape() {
        let name = dev_log_file_name();
        assert!(name.starts_with("scriptlauncher_dev_"));
        assert!(name.ends_with(".log"));
    }
}
