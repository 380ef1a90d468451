//! Command execution utilities.
//!
//! Provisioning is a strictly sequential list of external commands. Each
//! command is described by a [`CommandLine`] and handed to an [`Executor`],
//! which either spawns it ([`SystemExecutor`]) or records it
//! ([`RecordingExecutor`], used for dry runs and tests).

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::env::EnvVars;
use crate::error::{Error, Fix, Result};

/// An external command, either a shell string or a program with arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Interpreted by `sh -c` (or `cmd /C` on Windows). Only for commands
    /// that need pipes or shell substitution.
    Shell(String),
    /// Spawned directly, no shell interpretation of the arguments.
    Program { program: PathBuf, args: Vec<String> },
}

impl CommandLine {
    /// A command interpreted by the platform shell.
    pub fn shell(script: impl Into<String>) -> Self {
        CommandLine::Shell(script.into())
    }

    /// A program spawned with an explicit argument vector.
    pub fn program<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine::Program {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The program path, or `None` for shell strings.
    pub fn program_path(&self) -> Option<&Path> {
        match self {
            CommandLine::Program { program, .. } => Some(program),
            CommandLine::Shell(_) => None,
        }
    }

    /// The argument vector, empty for shell strings.
    pub fn args(&self) -> &[String] {
        match self {
            CommandLine::Program { args, .. } => args,
            CommandLine::Shell(_) => &[],
        }
    }

    fn to_command(&self) -> Command {
        match self {
            CommandLine::Shell(script) => shell_command(script),
            CommandLine::Program { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
        }
    }
}

#[cfg(not(windows))]
fn shell_command(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script);
    cmd
}

#[cfg(windows)]
fn shell_command(script: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").raw_arg(script);
    cmd
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandLine::Shell(script) => f.write_str(script),
            CommandLine::Program { program, args } => {
                write!(f, "{}", display_arg(&program.to_string_lossy()))?;
                for arg in args {
                    write!(f, " {}", display_arg(arg))?;
                }
                Ok(())
            }
        }
    }
}

/// Quote an argument for log display only. Never fed to a shell.
fn display_arg(arg: &str) -> String {
    if arg.is_empty() {
        "''".to_string()
    } else if arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// How a command's environment and failure are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Installer steps: `CI` is removed from the child environment and
    /// Homebrew's installed-dependents check is disabled.
    Provision,
    /// Spawned with the parent environment untouched.
    Direct,
}

/// Outcome of a command that ran to completion.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, `None` if the child was terminated by a signal
    pub exit_code: Option<i32>,
    /// How long the command took
    pub duration: Duration,
}

impl CommandOutput {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// A command runner with inherited stdio, so tool output streams straight
/// into the CI log.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    /// Environment variables to set
    pub env: Vec<(String, String)>,
    /// Environment variables to remove
    pub env_remove: Vec<String>,
    /// Send the child's stdout to our stderr, keeping stdout for a report
    pub stdout_to_stderr: bool,
}

impl CommandRunner {
    /// Create a new command runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner configured for `mode`.
    pub fn for_mode(mode: ExecMode) -> Self {
        match mode {
            ExecMode::Provision => Self::new()
                .without_env(EnvVars::CI)
                .with_env(EnvVars::HOMEBREW_NO_INSTALLED_DEPENDENTS_CHECK, "1"),
            ExecMode::Direct => Self::new(),
        }
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Remove an inherited environment variable.
    pub fn without_env(mut self, key: impl Into<String>) -> Self {
        self.env_remove.push(key.into());
        self
    }

    /// Redirect the child's stdout into our stderr.
    pub fn with_stdout_to_stderr(mut self) -> Self {
        self.stdout_to_stderr = true;
        self
    }

    /// Run a command to completion.
    #[instrument(skip(self), fields(command = %line))]
    pub async fn run(&self, line: &CommandLine) -> Result<CommandOutput> {
        let mut cmd = line.to_command();
        let stdout = if self.stdout_to_stderr {
            Stdio::from(std::io::stderr())
        } else {
            Stdio::inherit()
        };
        cmd.stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(Stdio::inherit());

        for key in &self.env_remove {
            cmd.env_remove(key);
        }

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let start = Instant::now();

        let status = cmd.status().await.map_err(|e| spawn_error(line, e))?;

        let duration = start.elapsed();
        let exit_code = status.code();

        debug!(
            exit_code = ?exit_code,
            duration_ms = duration.as_millis(),
            "Command completed"
        );

        Ok(CommandOutput {
            exit_code,
            duration,
        })
    }

    /// Run a command and return an error if it exits non-zero.
    pub async fn run_checked(&self, line: &CommandLine) -> Result<CommandOutput> {
        let output = self.run(line).await?;

        if !output.success() {
            return Err(Error::CommandFailed {
                command: line.to_string(),
                exit_code: output.exit_code,
            });
        }

        Ok(output)
    }
}

fn spawn_error(line: &CommandLine, source: std::io::Error) -> Error {
    let fixes = match (line, source.kind()) {
        (CommandLine::Program { program, .. }, std::io::ErrorKind::NotFound) => {
            vec![Fix::new(format!(
                "Make sure `{}` is installed and on PATH",
                program.display()
            ))]
        }
        _ => vec![],
    };
    Error::Spawn {
        command: line.to_string(),
        source,
        fixes,
    }
}

/// Runs provisioning commands one at a time.
///
/// Every call blocks the provisioning sequence until the command finishes;
/// a non-zero exit is returned as [`Error::CommandFailed`].
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `line` in `mode` and wait for it to exit successfully.
    async fn run(&self, line: &CommandLine, mode: ExecMode) -> Result<()>;
}

/// Executor that spawns real processes.
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    provision: CommandRunner,
    direct: CommandRunner,
}

impl SystemExecutor {
    /// Create an executor with the standard per-mode runners.
    pub fn new() -> Self {
        Self {
            provision: CommandRunner::for_mode(ExecMode::Provision),
            direct: CommandRunner::for_mode(ExecMode::Direct),
        }
    }

    /// Keep stdout free of tool output in every mode.
    pub fn with_stdout_to_stderr(self) -> Self {
        Self {
            provision: self.provision.with_stdout_to_stderr(),
            direct: self.direct.with_stdout_to_stderr(),
        }
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Executor for SystemExecutor {
    async fn run(&self, line: &CommandLine, mode: ExecMode) -> Result<()> {
        let runner = match mode {
            ExecMode::Provision => &self.provision,
            ExecMode::Direct => &self.direct,
        };
        runner.run_checked(line).await.map(|_| ())
    }
}

/// A command seen by a [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub line: CommandLine,
    pub mode: ExecMode,
}

/// Executor that records commands instead of running them.
///
/// Commands whose display form contains a registered pattern fail with the
/// registered exit code, which lets callers exercise failure paths.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    commands: Mutex<Vec<RecordedCommand>>,
    failures: Vec<(String, i32)>,
}

impl RecordingExecutor {
    /// Create an executor where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command whose display form contains `pattern`.
    pub fn fail_on(mut self, pattern: impl Into<String>, exit_code: i32) -> Self {
        self.failures.push((pattern.into(), exit_code));
        self
    }

    /// Commands recorded so far, in order.
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.commands
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Display forms of the recorded commands, in order.
    pub fn lines(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .map(|c| c.line.to_string())
            .collect()
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn run(&self, line: &CommandLine, mode: ExecMode) -> Result<()> {
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(RecordedCommand {
                line: line.clone(),
                mode,
            });
        }

        let display = line.to_string();
        if let Some((_, code)) = self.failures.iter().find(|(p, _)| display.contains(p)) {
            return Err(Error::CommandFailed {
                command: display,
                exit_code: Some(*code),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_program_quotes_empty_and_spaced_args() {
        let line = CommandLine::program("mysqladmin", ["-proot", "password", ""]);
        assert_eq!(line.to_string(), "mysqladmin -proot password ''");

        let line = CommandLine::program("mysql", ["-e", "FLUSH PRIVILEGES"]);
        assert_eq!(line.to_string(), "mysql -e \"FLUSH PRIVILEGES\"");
    }

    #[test]
    fn test_display_shell_is_verbatim() {
        let line = CommandLine::shell("echo a | tee b");
        assert_eq!(line.to_string(), "echo a | tee b");
        assert!(line.program_path().is_none());
        assert!(line.args().is_empty());
    }

    #[test]
    fn test_provision_runner_strips_ci() {
        let runner = CommandRunner::for_mode(ExecMode::Provision);
        assert_eq!(runner.env_remove, vec!["CI".to_string()]);
        assert!(
            runner
                .env
                .contains(&("HOMEBREW_NO_INSTALLED_DEPENDENTS_CHECK".into(), "1".into()))
        );

        let direct = CommandRunner::for_mode(ExecMode::Direct);
        assert!(direct.env.is_empty());
        assert!(direct.env_remove.is_empty());
    }

    #[tokio::test]
    async fn test_recording_executor_records_and_fails() {
        let exec = RecordingExecutor::new().fail_on("apt-get install", 100);

        exec.run(&CommandLine::program("sudo", ["true"]), ExecMode::Provision)
            .await
            .unwrap();
        let err = exec
            .run(
                &CommandLine::program("sudo", ["apt-get", "install", "mariadb-server"]),
                ExecMode::Provision,
            )
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), Some(100));
        assert_eq!(
            exec.lines(),
            vec!["sudo true", "sudo apt-get install mariadb-server"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_reports_exit_code() {
        let runner = CommandRunner::new();
        let ok = runner.run(&CommandLine::shell("exit 0")).await.unwrap();
        assert!(ok.success());

        let err = runner
            .run_checked(&CommandLine::shell("exit 3"))
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_kill_has_no_exit_code() {
        let runner = CommandRunner::new();
        let output = runner.run(&CommandLine::shell("kill -9 $$")).await.unwrap();
        assert!(!output.success());
        assert_eq!(output.exit_code, None);

        let err = runner
            .run_checked(&CommandLine::shell("kill -9 $$"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { exit_code: None, .. }));
        assert_eq!(err.exit_code(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_to_stderr_runs_to_completion() {
        let runner = CommandRunner::new().with_stdout_to_stderr();
        assert!(runner.stdout_to_stderr);
        let output = runner.run(&CommandLine::shell("echo redirected")).await.unwrap();
        assert!(output.success());
    }

    #[test]
    fn test_system_executor_redirects_both_modes() {
        let exec = SystemExecutor::new().with_stdout_to_stderr();
        assert!(exec.provision.stdout_to_stderr);
        assert!(exec.direct.stdout_to_stderr);
        assert!(!SystemExecutor::new().provision.stdout_to_stderr);
    }

    #[tokio::test]
    async fn test_system_runner_spawn_failure() {
        let runner = CommandRunner::new();
        let err = runner
            .run(&CommandLine::program(
                "definitely-not-a-real-binary-for-mdb",
                Vec::<String>::new(),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
        assert_eq!(err.fixes().len(), 1);
    }
}
