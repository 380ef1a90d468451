//! Printer abstraction for controlling output verbosity.

use crate::output::Verbosity;

/// Output verbosity level, derived from the global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Printer {
    /// Suppress all output.
    Silent,
    /// Suppress most output but keep command echo.
    Quiet,
    /// Normal output (default).
    #[default]
    Normal,
    /// Verbose output including debug messages.
    Verbose,
}

impl Printer {
    /// Create a printer from quiet/verbose flags.
    pub fn from_flags(quiet: u8, verbose: bool) -> Self {
        if quiet >= 2 {
            Self::Silent
        } else if quiet == 1 {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// The matching [`Verbosity`] for an [`Output`](crate::Output).
    pub fn verbosity(self) -> Verbosity {
        match self {
            Self::Silent => Verbosity::Silent,
            Self::Quiet => Verbosity::Quiet,
            Self::Normal => Verbosity::Normal,
            Self::Verbose => Verbosity::Verbose,
        }
    }
}
