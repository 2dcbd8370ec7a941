//! Logging bootstrap.
//!
//! Env-filtered tracing to stderr, with optional daily-rotating file
//! output when a log directory is configured. Returns the appender
//! guard; dropping it flushes buffered lines, so the caller holds it
//! for the process lifetime.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::CliError;

/// Default filter when RUST_LOG is unset.
const DEFAULT_FILTER: &str = "staffdex=info";

/// Initializes the global tracing subscriber.
pub fn init(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, CliError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "staffdex.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| CliError::Logging(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| CliError::Logging(e.to_string()))?;
            Ok(None)
        }
    }
}
