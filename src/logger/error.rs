//! Error types for the logger

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up log outputs
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A global subscriber was already installed
    #[error("Logger already initialized: {message}")]
    AlreadyInitialized { message: String },
}

impl LoggerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn open_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OpenFile {
            path: path.into(),
            source,
        }
    }
}
