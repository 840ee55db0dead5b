use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Log file kept next to the project's records
pub const LOG_FILE: &str = ".statusboard.log";

pub fn log_file_path(board_dir: &Path) -> PathBuf {
    board_dir.join(LOG_FILE)
}

/// Route tracing output to `boards/.statusboard.log` for the TUI, where stderr
/// would corrupt the screen. `RUST_LOG` overrides the default `info` filter.
pub fn init_tui_logging(board_dir: &Path) -> std::io::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(board_dir))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .try_init()
        .map_err(std::io::Error::other)
}

/// CLI commands log warnings to stderr unless `RUST_LOG` says otherwise.
pub fn init_cli_logging() -> Result<(), TryInitError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
}
