//! MSI installation on Windows.

use crate::installer::{Context, Installer, admin_user_statements};
use async_trait::async_trait;
use mdb_core::{CommandLine, Error, MariaDbVersion, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Service name registered by the MSI.
pub const SERVICE_NAME: &str = "MariaDB";

/// Account created for CI jobs on Windows runners.
pub const ADMIN_USER: &str = "runneradmin";

/// The mirror rejects curl's default user agent.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:89.0) Gecko/20100101 Firefox/89.0";

/// Construct the MSI download URL for a full release.
///
/// `suffix` is either empty or a `?<opts>` query string.
pub fn msi_download_url(mirror: &str, release: &str, suffix: &str) -> String {
    format!(
        "{mirror}/MariaDB/mariadb-{release}/winx64-packages/mariadb-{release}-winx64.msi{suffix}",
        mirror = mirror,
        release = release,
        suffix = suffix
    )
}

/// Cached installer filename for a full release.
pub fn msi_filename(release: &str) -> String {
    format!("mariadb-{}.msi", release)
}

/// Fixed install location of the client binaries.
pub fn install_bin_dir(version: MariaDbVersion) -> PathBuf {
    PathBuf::from(format!("C:\\Program Files\\MariaDB {}\\bin", version))
}

/// Downloads the official MSI and installs it silently.
#[derive(Debug, Clone, Default)]
pub struct MsiInstaller;

impl MsiInstaller {
    pub fn new() -> Self {
        Self
    }

    async fn download(&self, ctx: &Context<'_>, url: &str, target: &Path) -> Result<()> {
        // Cached by filename; there is no checksum to verify against.
        if target.exists() {
            info!("Installer already cached at {}", target.display());
            return Ok(());
        }

        debug!("Downloading from {}", url);
        ctx.run(CommandLine::program(
            "curl",
            [
                "-Ls".to_string(),
                "--user-agent".to_string(),
                BROWSER_USER_AGENT.to_string(),
                "-o".to_string(),
                target.display().to_string(),
                url.to_string(),
            ],
        ))
        .await
    }

    fn list_download_dir(&self, ctx: &Context<'_>, dir: &Path) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }
        let entries = fs::read_dir(dir)
            .map_err(|e| Error::io("failed to list download directory", dir, e))?;

        ctx.output.info(&format!("Contents of {}:", dir.display()));
        for entry in entries.flatten() {
            ctx.output.info(&entry.file_name().to_string_lossy());
        }
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        debug!("Creating directory: {}", path.display());
        fs::create_dir_all(path)
            .map_err(|e| Error::io("failed to create download directory", path, e))?;
    }
    Ok(())
}

#[async_trait]
impl Installer for MsiInstaller {
    fn name(&self) -> &'static str {
        "msi"
    }

    async fn install(&self, ctx: &Context<'_>) -> Result<PathBuf> {
        let version = ctx.inputs.version;
        let release = version.windows_release();
        let download_dir = &ctx.inputs.download_dir;
        let target = download_dir.join(msi_filename(release));

        if !ctx.is_dry_run() {
            ensure_dir(download_dir)?;
        }
        ctx.output.info(&format!("Target path is {}", target.display()));

        let url = msi_download_url(&ctx.inputs.mirror, release, &ctx.inputs.download_suffix());
        self.download(ctx, &url, &target).await?;
        self.list_download_dir(ctx, download_dir)?;

        ctx.run(CommandLine::program(
            "msiexec",
            [
                "/i".to_string(),
                target.display().to_string(),
                format!("SERVICENAME={}", SERVICE_NAME),
                "/qn".to_string(),
            ],
        ))
        .await?;

        let bin = install_bin_dir(version);
        let mysql = format!("{}\\mysql", bin.display());
        for statement in admin_user_statements(ADMIN_USER) {
            ctx.run(CommandLine::program(
                mysql.as_str(),
                ["-u".to_string(), "root".to_string(), "-e".to_string(), statement],
            ))
            .await?;
        }

        Ok(bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use mdb_config::RawInputs;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_download_url() {
        assert_eq!(
            msi_download_url("https://dlm.mariadb.com", "11.4.3", ""),
            "https://dlm.mariadb.com/MariaDB/mariadb-11.4.3/winx64-packages/mariadb-11.4.3-winx64.msi"
        );
        assert_eq!(
            msi_download_url("https://dlm.mariadb.com", "11.4.3", "?token=abc&x=1"),
            "https://dlm.mariadb.com/MariaDB/mariadb-11.4.3/winx64-packages/mariadb-11.4.3-winx64.msi?token=abc&x=1"
        );
    }

    #[test]
    fn test_bin_dir() {
        assert_eq!(
            install_bin_dir(MariaDbVersion::V10_11),
            PathBuf::from("C:\\Program Files\\MariaDB 10.11\\bin")
        );
    }

    fn fixture_in(dir: &Path) -> Fixture {
        Fixture::with_raw(RawInputs {
            download_dir: Some(dir.display().to_string()),
            download_getopt: Some("k=v".into()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_install_downloads_when_not_cached() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");
        let fixture = fixture_in(&dir);

        let bin = MsiInstaller::new().install(&fixture.ctx()).await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(bin, PathBuf::from("C:\\Program Files\\MariaDB 11.4\\bin"));

        let target = fixture.inputs.download_dir.join("mariadb-11.4.3.msi");
        let commands = fixture.executor.commands();
        assert_eq!(commands.len(), 5);

        let curl = &commands[0].line;
        assert_eq!(curl.program_path(), Some(Path::new("curl")));
        assert_eq!(
            curl.args(),
            [
                "-Ls".to_string(),
                "--user-agent".to_string(),
                BROWSER_USER_AGENT.to_string(),
                "-o".to_string(),
                target.display().to_string(),
                "https://dlm.mariadb.com/MariaDB/mariadb-11.4.3/winx64-packages/mariadb-11.4.3-winx64.msi?k=v".to_string(),
            ]
        );

        let msiexec = &commands[1].line;
        assert_eq!(msiexec.program_path(), Some(Path::new("msiexec")));
        assert_eq!(
            msiexec.args(),
            [
                "/i".to_string(),
                target.display().to_string(),
                "SERVICENAME=MariaDB".to_string(),
                "/qn".to_string(),
            ]
        );

        let sql: Vec<_> = commands[2..]
            .iter()
            .map(|c| c.line.args()[3].clone())
            .collect();
        assert_eq!(
            sql,
            vec![
                "CREATE USER 'runneradmin'@'localhost' IDENTIFIED BY ''",
                "GRANT ALL PRIVILEGES ON *.* TO 'runneradmin'@'localhost'",
                "FLUSH PRIVILEGES",
            ]
        );
        assert_eq!(
            commands[2].line.program_path(),
            Some(Path::new("C:\\Program Files\\MariaDB 11.4\\bin\\mysql"))
        );
    }

    #[tokio::test]
    async fn test_install_skips_download_when_cached() {
        let temp = TempDir::new().unwrap();
        let fixture = fixture_in(temp.path());
        fs::write(fixture.inputs.download_dir.join("mariadb-11.4.3.msi"), b"msi").unwrap();

        MsiInstaller::new().install(&fixture.ctx()).await.unwrap();

        let lines = fixture.executor.lines();
        assert!(lines.iter().all(|l| !l.starts_with("curl")));
        assert!(lines[0].starts_with("msiexec /i"));
    }

    #[tokio::test]
    async fn test_failed_download_stops_install() {
        let temp = TempDir::new().unwrap();
        let mut fixture = fixture_in(temp.path());
        fixture.executor = mdb_core::RecordingExecutor::new().fail_on("curl", 22);

        let err = MsiInstaller::new().install(&fixture.ctx()).await.unwrap_err();

        assert_eq!(err.exit_code(), Some(22));
        assert_eq!(fixture.executor.commands().len(), 1);
    }
}
