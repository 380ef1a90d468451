//! Input resolution for setup-mariadb.
//!
//! This crate handles:
//! - Validating the requested MariaDB version
//! - Applying defaults to action inputs
//! - Normalizing the download directory
//! - Reading ambient CI variables

pub mod ambient;
pub mod inputs;
pub mod paths;

pub use ambient::Ambient;
pub use inputs::{Inputs, RawInputs};
pub use paths::normalize_dir;

/// Default directory for cached installer downloads.
pub const DEFAULT_DOWNLOAD_DIR: &str = ".cache/mariadb";

/// Default mirror for installers and package repositories.
pub const DEFAULT_MIRROR: &str = "https://dlm.mariadb.com";
