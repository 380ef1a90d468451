//! Environment variable constants for setup-mariadb.
//!
//! This module defines all environment variables that setup-mariadb
//! recognizes, providing a single source of truth for environment
//! configuration.

/// Environment variable names used by setup-mariadb.
pub struct EnvVars;

impl EnvVars {
    // ─── Action Inputs ───────────────────────────────────────────────────────

    /// MariaDB release series to install.
    pub const INPUT_MARIADB_VERSION: &'static str = "INPUT_MARIADB-VERSION";

    /// Database to create after installation.
    pub const INPUT_DATABASE: &'static str = "INPUT_DATABASE";

    /// Directory for cached installer downloads.
    pub const INPUT_DOWNLOADDIR: &'static str = "INPUT_DOWNLOADDIR";

    /// Base URL for installer downloads and package repositories.
    pub const INPUT_MIRROR: &'static str = "INPUT_MIRROR";

    /// Query string appended to download URLs.
    pub const INPUT_DOWNLOAD_GETOPT: &'static str = "INPUT_DOWNLOAD_GETOPT";

    // ─── Tool Settings ───────────────────────────────────────────────────────

    /// Enable verbose output.
    pub const MDB_VERBOSE: &'static str = "MDB_VERBOSE";

    /// Suppress output.
    pub const MDB_QUIET: &'static str = "MDB_QUIET";

    /// Disable colored output.
    pub const MDB_NO_COLOR: &'static str = "MDB_NO_COLOR";

    /// Enable JSON log output.
    pub const MDB_LOG_JSON: &'static str = "MDB_LOG_JSON";

    // ─── CI Environment ──────────────────────────────────────────────────────

    /// CI environment indicator. Stripped from provisioning commands.
    pub const CI: &'static str = "CI";

    /// Runner image identifier (e.g. `ubuntu22`).
    pub const IMAGE_OS: &'static str = "ImageOS";

    /// File that registers extra PATH entries for later steps.
    pub const GITHUB_PATH: &'static str = "GITHUB_PATH";

    /// Invoking account name on Unix.
    pub const USER: &'static str = "USER";

    /// Invoking account name on Windows.
    pub const USERNAME: &'static str = "USERNAME";

    /// Set on provisioning commands to skip Homebrew's dependents check.
    pub const HOMEBREW_NO_INSTALLED_DEPENDENTS_CHECK: &'static str =
        "HOMEBREW_NO_INSTALLED_DEPENDENTS_CHECK";

    // ─── Standard Environment Variables ──────────────────────────────────────

    /// Standard NO_COLOR environment variable.
    pub const NO_COLOR: &'static str = "NO_COLOR";

    /// Standard CLICOLOR environment variable.
    pub const CLICOLOR: &'static str = "CLICOLOR";
}

/// Check if colors should be disabled based on environment.
pub fn no_color() -> bool {
    std::env::var(EnvVars::NO_COLOR).is_ok()
        || std::env::var(EnvVars::MDB_NO_COLOR).is_ok()
        || std::env::var(EnvVars::CLICOLOR)
            .map(|v| v == "0")
            .unwrap_or(false)
}
