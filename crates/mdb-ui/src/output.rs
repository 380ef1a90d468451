//! Output formatting for the setup-mariadb CLI.
//!
//! Everything goes to stderr; stdout is left to the tools being run and to
//! the `--json` report.

use crate::style::Style;
use mdb_core::CommandLine;
use mdb_core::error::{Error, Fix};

/// How much of the run is echoed. Errors are always printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Silent,
    /// Command echo only
    Quiet,
    #[default]
    Normal,
    /// Normal output; debug logs are enabled separately through tracing
    Verbose,
}

/// Progress and error reporting for a provisioning run.
#[derive(Debug, Clone)]
pub struct Output {
    verbosity: Verbosity,
}

impl Output {
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Echo a command line before it runs, so the CI log shows what
    /// produced the tool output that follows.
    pub fn command(&self, line: &CommandLine) {
        if self.verbosity >= Verbosity::Quiet {
            eprintln!("{} {}", Style::dim("$"), line);
        }
    }

    /// Print a right-aligned step title followed by `message`.
    pub fn status(&self, action: &str, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{:>12} {}", Style::bold(Style::success(action)), message);
        }
    }

    /// Print a plain line.
    pub fn info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}", message);
        }
    }

    /// Print `error`, its detail lines, and any fixes.
    pub fn print_error(&self, error: &Error) {
        eprintln!();
        eprintln!("{}: {}", Style::error("error"), error);

        for (label, detail) in error_details(error) {
            eprintln!("  {} {}", Style::dim(label), detail);
        }

        let fixes = error.fixes();
        if !fixes.is_empty() {
            eprintln!();
            for Fix { description } in fixes {
                eprintln!("{}: {}", Style::info("fix"), description);
            }
        }
    }

    /// Print a bold heading preceded by a blank line.
    pub fn header(&self, title: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!();
            eprintln!("{}", Style::bold(title));
        }
    }

    /// Print an indented `key: value` line.
    pub fn list_item(&self, key: &str, value: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("  {}: {}", Style::dim(key), value);
        }
    }

    /// Print the closing line of a successful run.
    pub fn success_summary(&self, action: &str, duration: std::time::Duration) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!(
                "{} {} {}",
                Style::success("✓"),
                action,
                Style::dim(format!("({})", Style::duration(duration)))
            );
        }
    }
}

/// Labelled detail lines printed under an error message.
fn error_details(error: &Error) -> Vec<(&'static str, String)> {
    match error {
        Error::Config { .. } => vec![],
        Error::Spawn { source, .. } => vec![("cause:", source.to_string())],
        Error::CommandFailed {
            exit_code: Some(code),
            ..
        } => vec![("exit code:", code.to_string())],
        Error::CommandFailed {
            exit_code: None, ..
        } => vec![("cause:", "terminated by a signal".to_string())],
        Error::Io { path, source, .. } => vec![
            ("-->", path.display().to_string()),
            ("cause:", source.to_string()),
        ],
    }
}
