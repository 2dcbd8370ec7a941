//! CLI error types.

use std::fmt;

/// Errors surfaced by the CLI before or during serving.
#[derive(Debug)]
pub enum CliError {
    /// Configuration problem (bad file, bad flag combination).
    Config(String),

    /// Failed to create the Tokio runtime.
    Runtime(String),

    /// Failed to bind or serve the HTTP listener.
    Serve(std::io::Error),

    /// Failed to initialize logging.
    Logging(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(msg) => write!(f, "Failed to create Tokio runtime: {}", msg),
            CliError::Serve(e) => write!(f, "Failed to serve: {}", e),
            CliError::Logging(msg) => write!(f, "Failed to initialize logging: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Serve(e) => Some(e),
            _ => None,
        }
    }
}
