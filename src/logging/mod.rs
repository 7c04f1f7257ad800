//! Structured logging for the MDR scenario generator
//!
//! Console output on stderr plus daily-rotated JSON files under
//! `<config dir>/mdr-scenario/logs/`.

pub mod macros;

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const APP_DIR_NAME: &str = "mdr-scenario";
const LOG_FILE_PREFIX: &str = "mdr-scenario.log";

/// Initialize the logging system
///
/// Set `RUST_LOG` to control the level (default `info`), e.g. `RUST_LOG=debug`
/// to see prompt sizes and layout page counts.
///
/// Calling this twice is harmless; the second call keeps the installed
/// subscriber and returns the log directory.
pub fn init_logging() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    // stdout carries command output, so the console layer writes to stderr.
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .json();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let init_result = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if let Err(e) = init_result {
        if e.to_string().contains("already been set") {
            return Ok(log_dir);
        }
        return Err(Box::new(e));
    }

    match get_current_log_file() {
        Ok(file) => tracing::info!("Logging initialized. Log file: {}", file.display()),
        Err(_) => tracing::info!("Logging initialized. Log directory: {}", log_dir.display()),
    }

    Ok(log_dir)
}

/// Returns `%LOCALAPPDATA%/mdr-scenario/logs` on Windows,
/// `~/.config/mdr-scenario/logs` elsewhere.
fn get_log_directory() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = if cfg!(target_os = "windows") {
        dirs::data_local_dir().ok_or("Could not find local app data directory")?
    } else {
        dirs::config_dir().ok_or("Could not find config directory")?
    };

    Ok(base_dir.join(APP_DIR_NAME).join("logs"))
}

/// Path of today's log file.
pub fn get_current_log_file() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_dir = get_log_directory()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    Ok(log_dir.join(format!("{}.{}", LOG_FILE_PREFIX, today)))
}
