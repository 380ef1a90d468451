//! Error types for setup-mariadb.

use std::path::PathBuf;

/// Result type alias using the setup-mariadb Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes for categorizing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input or ambient configuration
    ConfigError,
    /// External command could not be started
    SpawnFailed,
    /// External command exited non-zero
    CommandFailed,
    /// I/O error
    IoError,
}

/// A fix suggestion for an error.
#[derive(Debug, Clone)]
pub struct Fix {
    pub description: String,
}

impl Fix {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Structured error type for setup-mariadb.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {message}")]
    Config { message: String, fixes: Vec<Fix> },

    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
        fixes: Vec<Fix>,
    },

    /// `exit_code` is `None` when the child was terminated by a signal.
    #[error("command failed: {command}")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Config { .. } => ErrorCode::ConfigError,
            Error::Spawn { .. } => ErrorCode::SpawnFailed,
            Error::CommandFailed { .. } => ErrorCode::CommandFailed,
            Error::Io { .. } => ErrorCode::IoError,
        }
    }

    /// Get suggested fixes for this error.
    pub fn fixes(&self) -> &[Fix] {
        match self {
            Error::Config { fixes, .. } => fixes,
            Error::Spawn { fixes, .. } => fixes,
            Error::CommandFailed { .. } | Error::Io { .. } => &[],
        }
    }

    /// Exit code of the failed subprocess, if the error came from one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    /// Create a config error with a fix suggestion attached.
    pub fn config_with_fix(message: impl Into<String>, fix: Fix) -> Self {
        Error::Config {
            message: message.into(),
            fixes: vec![fix],
        }
    }

    /// Create an I/O error for an operation on `path`.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            path: path.into(),
            source,
        }
    }
}
