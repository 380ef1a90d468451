//! setup-mariadb - MariaDB for CI runners
//!
//! Installs and starts MariaDB on Linux, macOS, or Windows, creates a
//! passwordless administrative user, and optionally a database.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod styles;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    mdb_ui::style::configure_colors(cli.global.no_color);

    // Initialize telemetry
    mdb_telemetry::init(cli.global.verbose);

    let exit_code = commands::run(cli).await?;

    std::process::exit(exit_code);
}
