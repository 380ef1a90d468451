//! The installer abstraction shared by every platform.

use async_trait::async_trait;
use mdb_config::{Ambient, Inputs};
use mdb_core::{CommandLine, ExecMode, Executor, Result};
use mdb_ui::Output;
use std::path::PathBuf;

/// Everything an installer needs: resolved inputs, the CI environment, and
/// where to send commands.
pub struct Context<'a> {
    pub inputs: &'a Inputs,
    pub ambient: &'a Ambient,
    pub output: &'a Output,
    executor: &'a dyn Executor,
    dry_run: bool,
}

impl<'a> Context<'a> {
    /// Create a context that runs commands through `executor`.
    pub fn new(
        inputs: &'a Inputs,
        ambient: &'a Ambient,
        executor: &'a dyn Executor,
        output: &'a Output,
    ) -> Self {
        Self {
            inputs,
            ambient,
            output,
            executor,
            dry_run: false,
        }
    }

    /// Skip filesystem side effects (directory creation, PATH export).
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether filesystem side effects are suppressed.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Echo and run an installer step. Any failure is fatal.
    pub async fn run(&self, line: CommandLine) -> Result<()> {
        self.output.command(&line);
        self.executor.run(&line, ExecMode::Provision).await
    }

    /// Echo and run a program without a shell and without environment changes.
    pub async fn run_direct(&self, line: CommandLine) -> Result<()> {
        self.output.command(&line);
        self.executor.run(&line, ExecMode::Direct).await
    }
}

/// A platform-specific way of installing and starting MariaDB.
#[async_trait]
pub trait Installer: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Install, start the service, configure the administrative user, and
    /// report the directory holding the client binaries.
    async fn install(&self, ctx: &Context<'_>) -> Result<PathBuf>;
}

/// Statements that create a passwordless `user@localhost` with all privileges.
pub fn admin_user_statements(user: &str) -> [String; 3] {
    let account = format!("'{}'@'localhost'", user.replace('\'', "''"));
    [
        format!("CREATE USER {} IDENTIFIED BY ''", account),
        format!("GRANT ALL PRIVILEGES ON *.* TO {}", account),
        "FLUSH PRIVILEGES".to_string(),
    ]
}
