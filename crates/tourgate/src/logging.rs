//! Logging setup

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

use crate::config::{LogFormat, LoggingConfig};

/// Path of the log file for a given day
pub fn log_file_path(directory: &Path, date: NaiveDate) -> PathBuf {
    directory.join(format!("app-{}.log", date.format("%Y-%m-%d")))
}

/// Open (or create) the day's log file in append mode
fn open_log_file(directory: &Path, date: NaiveDate) -> Result<File> {
    std::fs::create_dir_all(directory).with_context(|| {
        format!("Failed to create log directory: {}", directory.display())
    })?;

    let path = log_file_path(directory, date);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Initialize logging
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let stdout_layer = match config.format {
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Pretty => fmt::layer().boxed(),
    };

    let file_layer = match &config.directory {
        Some(directory) => {
            let file = open_log_file(directory, Utc::now().date_naive())?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
