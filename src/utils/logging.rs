//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to `<data dir>/folio.log`.
//! Every startup rotates the previous session's file into a numbered history
//! of up to nine files, so the last 10 sessions are kept.

use crate::config::ConfigManager;
use crate::error::{FolioError, Result, StringError};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "folio.log";

/// Maximum number of historical log files to keep (folio.log.1 through folio.log.9)
const MAX_LOG_FILES: u8 = 9;

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via `RUST_LOG`.
pub fn init_logging() -> Result<()> {
    let log_dir = ConfigManager::data_dir();
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join(LOG_FILE_NAME);
    let rotated = rotate_logs_on_startup(&log_path)?;

    let subscriber = fmt()
        .with_writer(session_appender(&log_dir)?)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false) // Plain text in the file
        .with_target(true)
        .with_thread_ids(true) // Controller, workers and printer all log
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| FolioError::ConfigError(Box::new(e)))?;

    tracing::info!(
        "Folio v{} started, logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_path.display()
    );
    if rotated {
        tracing::debug!("Previous session moved to {}", history_path(&log_path, 1).display());
    }

    Ok(())
}

/// Appender writing this session's `folio.log`
fn session_appender(log_dir: &Path) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER) // rotated once per startup instead
        .filename_prefix("folio")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| FolioError::ConfigError(Box::new(e)))
}

/// `folio.log.N` next to `log_path`
fn history_path(log_path: &Path, n: u8) -> PathBuf {
    let mut name = log_path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

/// Shift the session history by one and move the current log to `folio.log.1`
///
/// The oldest file falls off the end. Gaps in the history are kept as gaps.
/// Returns `false` when there was no current log to rotate.
fn rotate_logs_on_startup(log_path: &Path) -> Result<bool> {
    if !log_path.exists() {
        return Ok(false);
    }
    if log_path.file_name().is_none() {
        return Err(FolioError::ConfigError(StringError::new("Invalid log filename")));
    }

    let oldest = history_path(log_path, MAX_LOG_FILES);
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }

    // Newest last so nothing is overwritten
    for i in (1..MAX_LOG_FILES).rev() {
        let from = history_path(log_path, i);
        if from.exists() {
            std::fs::rename(&from, history_path(log_path, i + 1))?;
        }
    }

    std::fs::rename(log_path, history_path(log_path, 1))?;
    Ok(true)
}
