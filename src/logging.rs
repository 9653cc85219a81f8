//! Logging setup.
//!
//! The terminal belongs to the TUI while it runs, so logs go to a daily
//! rolling file under `~/.teatime/logs` (or `--log-dir`). Verbosity follows
//! `RUST_LOG` when set, otherwise `teatime=info`, or `teatime=debug` with
//! `--verbose`.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Error, Result};

/// Flushes pending log lines when dropped. Hold it for the program lifetime.
pub struct LogGuard {
    _file_guard: WorkerGuard,
}

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Fails when the log directory cannot be determined or created.
pub fn init_logging(log_dir: Option<PathBuf>, verbose: bool) -> Result<LogGuard> {
    let log_dir = match log_dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };

    std::fs::create_dir_all(&log_dir).map_err(|e| Error::DirectoryCreation {
        path: log_dir.clone(),
        source: e,
    })?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "teatime.log");
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("teatime={default_level}")));

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true)
        .with_file(verbose)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::debug!(log_dir = %log_dir.display(), verbose, "logging initialized");

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

/// Console-only logging for tests.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Returns `~/.teatime/logs`.
pub fn default_log_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").ok_or(Error::HomeNotSet)?;
    Ok(PathBuf::from(home).join(".teatime").join("logs"))
}
