//! Homebrew installation on macOS.

use crate::installer::{Context, Installer};
use crate::platform::Arch;
use async_trait::async_trait;
use mdb_core::{CommandLine, MariaDbVersion, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Installs `mariadb@<version>` with Homebrew.
#[derive(Debug, Clone)]
pub struct Homebrew {
    arch: Arch,
    tap_root: PathBuf,
}

impl Homebrew {
    /// Create an installer using the standard Homebrew layout for `arch`.
    pub fn new(arch: Arch) -> Self {
        let tap_prefix = match arch {
            Arch::Arm64 => "/opt/homebrew",
            Arch::X86_64 => "/usr/local/Homebrew",
        };
        Self {
            arch,
            tap_root: PathBuf::from(format!(
                "{}/Library/Taps/homebrew/homebrew-core",
                tap_prefix
            )),
        }
    }

    /// Look for formulae in `root` instead of the homebrew-core tap.
    pub fn with_tap_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.tap_root = root.into();
        self
    }

    /// Formula name for a release series.
    pub fn formula(version: MariaDbVersion) -> String {
        format!("mariadb@{}", version)
    }

    /// Whether the local tap already knows `formula`, as a formula file or
    /// an alias.
    pub fn formula_present(&self, formula: &str) -> bool {
        let Some(first) = formula.chars().next() else {
            return false;
        };
        let formula_file = self
            .tap_root
            .join("Formula")
            .join(first.to_string())
            .join(format!("{}.rb", formula));
        let alias = self.tap_root.join("Aliases").join(formula);
        debug!(
            formula_file = %formula_file.display(),
            alias = %alias.display(),
            "Checking tap for formula"
        );
        formula_file.exists() || alias.exists()
    }

    /// Installation prefix for this architecture.
    pub fn prefix(&self) -> &'static str {
        match self.arch {
            Arch::Arm64 => "/opt/homebrew",
            Arch::X86_64 => "/usr/local",
        }
    }

    /// Directory holding the formula's binaries.
    pub fn bin_dir(&self, formula: &str) -> PathBuf {
        PathBuf::from(format!("{}/opt/{}/bin", self.prefix(), formula))
    }

    /// Tap directory used for the presence check.
    pub fn tap_root(&self) -> &Path {
        &self.tap_root
    }
}

#[async_trait]
impl Installer for Homebrew {
    fn name(&self) -> &'static str {
        "homebrew"
    }

    async fn install(&self, ctx: &Context<'_>) -> Result<PathBuf> {
        let formula = Self::formula(ctx.inputs.version);

        // `brew update` is slow; only refresh when the tap lacks the formula.
        if !self.formula_present(&formula) {
            info!("{} not found in local tap, updating Homebrew", formula);
            ctx.run(CommandLine::program("brew", ["update"])).await?;
        }

        ctx.run(CommandLine::program("brew", ["install", formula.as_str()]))
            .await?;

        let bin = self.bin_dir(&formula);
        ctx.run(CommandLine::program(
            format!("{}/mysql.server", bin.display()),
            ["start"],
        ))
        .await?;

        Ok(bin)
    }
}
