//! Logging support for ptrstyle
//!
//! Diagnostics go to stderr, filtered by verbosity (or RUST_LOG). When debug
//! logging is enabled via config, the same events are also appended to
//! ~/.ptrstyle/ptrstyle.log.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

const LOG_FILE_NAME: &str = "ptrstyle.log";

/// Default filter directive for a verbosity level (`-v` count)
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "ptrstyle=warn",
        1 => "ptrstyle=info",
        _ => "ptrstyle=debug",
    }
}

/// Initialize the logging system
///
/// Returns the guard of the file writer when debug logging is active; it
/// must be kept alive until the program exits so buffered lines get flushed.
pub fn init_logging(verbosity: u8, debug_enabled: bool) -> Result<Option<WorkerGuard>> {
    let stderr_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(stderr_filter);

    let (file_layer, guard) = match debug_log_writer(debug_enabled) {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(true)
                .with_filter(EnvFilter::new("ptrstyle=debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(guard)
}

fn debug_log_writer(
    debug_enabled: bool,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !debug_enabled {
        return None;
    }

    let log_path = match get_log_path() {
        Some(path) => path,
        None => {
            eprintln!("Warning: Cannot determine home directory, debug log disabled");
            return None;
        }
    };

    // If we can't open the log file, gracefully fall back to stderr only
    let opened = log_path
        .parent()
        .map(fs::create_dir_all)
        .transpose()
        .and_then(|_| {
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
        });

    match opened {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            eprintln!(
                "Warning: Could not open log file {}: {}",
                log_path.display(),
                e
            );
            None
        }
    }
}

/// Get the debug log file path (~/.ptrstyle/ptrstyle.log)
pub fn get_log_path() -> Option<PathBuf> {
    crate::config::config_dir()
        .ok()
        .map(|dir| dir.join(LOG_FILE_NAME))
}
