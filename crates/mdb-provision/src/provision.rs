//! The provisioning sequence.
//!
//! install -> start service -> configure user -> export PATH -> create
//! database. Each step runs only if every earlier step succeeded.

use crate::database::create_database;
use crate::installer::{Context, Installer};
use crate::linux::AptInstaller;
use crate::macos::Homebrew;
use crate::path::export_path;
use crate::platform::Platform;
use crate::windows::MsiInstaller;
use mdb_core::{MariaDbVersion, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Summary of a finished provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Installed release series.
    pub version: MariaDbVersion,
    /// Platform the run took.
    pub platform: Platform,
    /// Directory holding the client binaries.
    pub bin_dir: PathBuf,
    /// Whether `bin_dir` was written to the PATH-registration file.
    pub path_exported: bool,
    /// Database created, if one was requested.
    pub database: Option<String>,
    /// Whether commands were only recorded.
    pub dry_run: bool,
}

/// Select the installer for `platform`.
pub fn installer_for(platform: Platform) -> Box<dyn Installer> {
    match platform {
        Platform::MacOs { arch } => Box::new(Homebrew::new(arch)),
        Platform::Windows => Box::new(MsiInstaller::new()),
        Platform::Linux => Box::new(AptInstaller::new()),
    }
}

/// Provision MariaDB on `platform` with its standard installer.
pub async fn provision(platform: Platform, ctx: &Context<'_>) -> Result<Report> {
    let installer = installer_for(platform);
    provision_with(platform, installer.as_ref(), ctx).await
}

/// Provision MariaDB using `installer`.
#[instrument(skip(installer, ctx), fields(installer = installer.name()))]
pub async fn provision_with(
    platform: Platform,
    installer: &dyn Installer,
    ctx: &Context<'_>,
) -> Result<Report> {
    let version = ctx.inputs.version;

    ctx.output.status(
        "Installing",
        &format!("MariaDB {} on {}", version, platform),
    );
    let bin_dir = installer.install(ctx).await?;
    info!("MariaDB {} installed, binaries in {}", version, bin_dir.display());

    let path_exported = if ctx.is_dry_run() {
        false
    } else {
        let exported = export_path(&bin_dir, ctx.ambient.github_path.as_deref())?;
        if exported {
            ctx.output
                .status("Exported", &bin_dir.display().to_string());
        }
        exported
    };

    if let Some(ref database) = ctx.inputs.database {
        ctx.output.status("Creating", &format!("database {}", database));
        create_database(ctx, &bin_dir, database).await?;
    }

    Ok(Report {
        version,
        platform,
        bin_dir,
        path_exported,
        database: ctx.inputs.database.clone(),
        dry_run: ctx.is_dry_run(),
    })
}
