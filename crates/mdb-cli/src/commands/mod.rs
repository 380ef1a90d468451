//! Command implementations.

mod install;
mod versions;

use crate::cli::{Cli, Commands};
use anyhow::Result;
use mdb_core::{Error, ExitCode};
use mdb_ui::{Output, Printer};

/// Run the CLI command.
pub async fn run(cli: Cli) -> Result<i32> {
    let printer = Printer::from_flags(cli.global.quiet, cli.global.verbose);
    let output = Output::with_verbosity(printer.verbosity());

    match cli.command {
        Some(Commands::Versions) => versions::run(&output),
        None => install::run(&cli.install, &output).await,
    }
}

/// Process exit code for a failed run.
///
/// A failing subprocess's own non-zero exit code is passed through. A child
/// killed by a signal has none and maps to [`ExitCode::CommandError`].
fn exit_code_for(error: &Error) -> i32 {
    error
        .exit_code()
        .filter(|code| *code != 0)
        .unwrap_or_else(|| ExitCode::from(error).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdb_core::{CommandLine, CommandRunner, Fix};

    #[test]
    fn test_exit_code_passthrough() {
        let err = Error::CommandFailed {
            command: "sudo apt-get install mariadb-server".into(),
            exit_code: Some(100),
        };
        assert_eq!(exit_code_for(&err), 100);

        let err = Error::config_with_fix("bad", Fix::new("use 11.4"));
        assert_eq!(exit_code_for(&err), 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_killed_command_exits_with_command_error() {
        let err = CommandRunner::new()
            .run_checked(&CommandLine::shell("kill -9 $$"))
            .await
            .unwrap_err();
        assert_eq!(exit_code_for(&err), 4);
    }
}
