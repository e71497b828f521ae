//! Tracing setup.
//!
//! The TUI owns the terminal, so log output goes to a file:
//!
//! ```text
//! ~/.local/share/hp-explorer/hp-explorer.log
//! ```
//!
//! `RUST_LOG` takes precedence over the configured level.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "hp-explorer.log";

/// Default location of the log file.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "hp-explorer")
        .context("Could not determine data directory")?;
    Ok(dirs.data_local_dir().join(LOG_FILE_NAME))
}

/// Build the filter: `RUST_LOG` if set and valid, else `level`, else `info`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a global subscriber appending to `path`.
///
/// Calling this more than once is harmless; only the first call takes effect.
pub fn init_logging(level: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    Ok(())
}
