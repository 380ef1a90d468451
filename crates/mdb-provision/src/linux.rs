//! apt installation on Linux.

use crate::installer::{Context, Installer, admin_user_statements};
use async_trait::async_trait;
use mdb_core::{CommandLine, EnvVars, Error, Fix, MariaDbVersion, Result};
use std::path::PathBuf;
use tracing::info;

/// Signing key for the MariaDB apt repositories.
pub const REPO_KEY_ID: &str = "0xF1656F24C74CD1D8";

/// Keyserver the signing key is fetched from.
pub const KEYSERVER: &str = "hkp://keyserver.ubuntu.com:80";

/// Source list written for the MariaDB repository.
pub const SOURCE_LIST: &str = "/etc/apt/sources.list.d/mariadb.list";

/// Data directory of the preinstalled MySQL on runner images.
pub const MYSQL_DATA_DIR: &str = "/var/lib/mysql";

/// Installs `mariadb-server` from the MariaDB apt repository.
#[derive(Debug, Clone, Default)]
pub struct AptInstaller;

impl AptInstaller {
    pub fn new() -> Self {
        Self
    }
}

fn sudo<I, S>(args: I) -> CommandLine
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CommandLine::program("sudo", args)
}

/// Shell command that writes the repository source list.
///
/// This stays a shell string: the distribution codename is read from
/// `/etc/os-release` and the line is piped through `sudo tee`.
pub fn source_list_command(mirror: &str, version: MariaDbVersion) -> CommandLine {
    CommandLine::shell(format!(
        "echo \"deb [arch=amd64,arm64] {mirror}/repo/mariadb-server/{version}/repo/ubuntu \
         $(. /etc/os-release && echo $VERSION_CODENAME) main\" | sudo tee {list}",
        mirror = mirror,
        version = version,
        list = SOURCE_LIST
    ))
}

/// Reject mirrors that are unsafe to place in [`source_list_command`].
pub fn validate_mirror(mirror: &str) -> Result<()> {
    let scheme_ok = mirror.starts_with("https://") || mirror.starts_with("http://");
    let unsafe_char = mirror.chars().any(|c| {
        c.is_whitespace() || matches!(c, '"' | '\'' | '`' | '$' | '\\' | ';' | '|' | '&')
    });

    if !scheme_ok || unsafe_char {
        return Err(Error::config_with_fix(
            format!("Invalid mirror URL: {}", mirror),
            Fix::new("Use a plain http:// or https:// base URL, e.g. https://dlm.mariadb.com"),
        ));
    }
    Ok(())
}

/// `apt-get update` restricted to the MariaDB source list.
pub fn scoped_update_command() -> CommandLine {
    sudo([
        "apt-get",
        "update",
        "-o",
        "Dir::Etc::sourcelist=sources.list.d/mariadb.list",
        "-o",
        "Dir::Etc::sourceparts=-",
        "-o",
        "APT::Get::List-Cleanup=0",
    ])
}

#[async_trait]
impl Installer for AptInstaller {
    fn name(&self) -> &'static str {
        "apt"
    }

    async fn install(&self, ctx: &Context<'_>) -> Result<PathBuf> {
        let user = ctx.ambient.user.clone().ok_or_else(|| {
            Error::config_with_fix(
                "could not determine the invoking user",
                Fix::new(format!(
                    "Set {} to the account that should get database access",
                    EnvVars::USER
                )),
            )
        })?;
        validate_mirror(&ctx.inputs.mirror)?;

        if ctx.ambient.needs_cleanup() {
            info!("Clearing preinstalled MySQL data");
            ctx.run(sudo(["systemctl", "stop", "mysql.service"])).await?;
            ctx.run(sudo(["rm", "-rf", MYSQL_DATA_DIR])).await?;
        }

        ctx.run(sudo([
            "apt-key",
            "adv",
            "--recv-keys",
            "--keyserver",
            KEYSERVER,
            REPO_KEY_ID,
        ]))
        .await?;
        ctx.run(source_list_command(&ctx.inputs.mirror, ctx.inputs.version))
            .await?;
        ctx.run(scoped_update_command()).await?;
        ctx.run(sudo(["apt-get", "install", "mariadb-server"])).await?;

        ctx.run(sudo(["systemctl", "start", "mariadb"])).await?;

        ctx.run(sudo(["mysqladmin", "-proot", "password", ""])).await?;

        for statement in admin_user_statements(&user) {
            ctx.run(sudo(["mysql".to_string(), "-e".to_string(), statement]))
                .await?;
        }

        Ok(PathBuf::from("/usr/bin"))
    }
}
