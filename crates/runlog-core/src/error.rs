//! Error types for registry and handler lookups

use thiserror::Error;

/// Errors that can occur during registry and handler operations
#[derive(Error, Debug)]
pub enum Error {
    /// No logger is registered under the requested name
    #[error("logger not found: {0}")]
    LoggerNotFound(String),

    /// The source logger has no handler under the requested name
    #[error("handler not found: \"{handler}\" on logger \"{logger}\"")]
    HandlerNotFound { logger: String, handler: String },

    /// Filesystem error while creating or clearing log files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a handler-not-found error
    pub fn handler_not_found(logger: impl Into<String>, handler: impl Into<String>) -> Self {
        Self::HandlerNotFound {
            logger: logger.into(),
            handler: handler.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
