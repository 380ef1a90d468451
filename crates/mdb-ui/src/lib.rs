//! Terminal UI helpers for setup-mariadb.
//!
//! This crate provides consistent output formatting, command echo, and
//! error display for the setup-mariadb CLI.

pub mod output;
pub mod printer;
pub mod style;

pub use output::{Output, Verbosity};
pub use printer::Printer;
pub use style::Style;
