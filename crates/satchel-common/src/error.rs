//! Error types for Satchel.

use thiserror::Error;

/// Top-level error type for Satchel operations.
///
/// Only setup can fail hard; steady-state inventory errors live in the
/// inventory crate and are absorbed by the panel.
#[derive(Debug, Error)]
pub enum SatchelError {
    /// The host has no widget tree to render into
    #[error("Missing layout: {0}")]
    MissingLayout(String),

    /// Configuration could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Satchel operations.
pub type SatchelResult<T> = Result<T, SatchelError>;
