//! Core types for setup-mariadb.
//!
//! This crate provides shared types, error handling, and command execution
//! utilities used across all setup-mariadb crates.

pub mod command;
pub mod env;
pub mod error;
pub mod version;

pub use command::{
    CommandLine, CommandOutput, CommandRunner, ExecMode, Executor, RecordedCommand,
    RecordingExecutor, SystemExecutor,
};
pub use env::EnvVars;
pub use error::{Error, ErrorCode, Fix, Result};
pub use version::{MariaDbVersion, UnsupportedVersion};

/// Exit codes for the setup-mariadb CLI.
///
/// A failing subprocess's own exit code takes precedence over these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    GeneralError = 1,
    /// Configuration error
    ConfigError = 3,
    /// External command error
    CommandError = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(error: &Error) -> Self {
        match error.code() {
            ErrorCode::ConfigError => ExitCode::ConfigError,
            ErrorCode::SpawnFailed | ErrorCode::CommandFailed => ExitCode::CommandError,
            ErrorCode::IoError => ExitCode::GeneralError,
        }
    }
}
