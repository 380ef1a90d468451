//! CLI argument parsing.
//!
//! Every provisioning input can come from a flag or from the matching
//! GitHub Actions `INPUT_*` variable.

use clap::{Args, Parser, Subcommand, ValueEnum};
use mdb_config::RawInputs;
use mdb_core::EnvVars;
use mdb_provision::{Arch, Platform};

use crate::styles::STYLES;

/// setup-mariadb - MariaDB for CI runners
#[derive(Parser, Debug)]
#[command(name = "setup-mariadb")]
#[command(author, version, about = "Provision a MariaDB server on a CI runner")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(styles = STYLES)]
#[command(after_help = "Without a subcommand, MariaDB is installed and started.")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub install: InstallArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true, env = EnvVars::MDB_VERBOSE)]
    pub verbose: bool,

    /// Suppress output (use twice for complete silence)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, env = EnvVars::MDB_QUIET)]
    pub quiet: u8,

    /// Disable colored output
    #[arg(long, global = true, env = EnvVars::MDB_NO_COLOR)]
    pub no_color: bool,
}

/// Provisioning inputs.
#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    /// MariaDB release series to install [default: 11.4]
    #[arg(long = "mariadb-version", value_name = "VERSION", env = EnvVars::INPUT_MARIADB_VERSION)]
    pub mariadb_version: Option<String>,

    /// Database to create after installation
    #[arg(long, value_name = "NAME", env = EnvVars::INPUT_DATABASE)]
    pub database: Option<String>,

    /// Directory for cached installer downloads [default: .cache/mariadb]
    #[arg(long = "download-dir", value_name = "DIR", env = EnvVars::INPUT_DOWNLOADDIR)]
    pub download_dir: Option<String>,

    /// Base URL for installers and package repositories [default: https://dlm.mariadb.com]
    #[arg(long, value_name = "URL", env = EnvVars::INPUT_MIRROR)]
    pub mirror: Option<String>,

    /// Query string appended to download URLs
    #[arg(long = "download-getopt", value_name = "QUERY", env = EnvVars::INPUT_DOWNLOAD_GETOPT)]
    pub download_getopt: Option<String>,

    /// Print the commands that would run without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Plan for another platform instead of the host
    #[arg(long, value_enum, requires = "dry_run")]
    pub platform: Option<PlatformArg>,

    /// Print a JSON report to stdout when done (tool output goes to stderr)
    #[arg(long)]
    pub json: bool,
}

impl InstallArgs {
    /// The inputs as given, before defaults and validation.
    pub fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            mariadb_version: self.mariadb_version.clone(),
            database: self.database.clone(),
            download_dir: self.download_dir.clone(),
            mirror: self.mirror.clone(),
            download_getopt: self.download_getopt.clone(),
        }
    }
}

/// Platform override for dry runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Linux,
    Macos,
    MacosArm64,
    Windows,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Linux => Platform::Linux,
            PlatformArg::Macos => Platform::MacOs { arch: Arch::X86_64 },
            PlatformArg::MacosArm64 => Platform::MacOs { arch: Arch::Arm64 },
            PlatformArg::Windows => Platform::Windows,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported MariaDB versions
    Versions,
}
