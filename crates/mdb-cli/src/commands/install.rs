//! Provision MariaDB on the current runner.

use super::exit_code_for;
use crate::cli::InstallArgs;
use anyhow::{Context as _, Result};
use mdb_config::{Ambient, Inputs};
use mdb_core::{Error, Executor, RecordingExecutor, SystemExecutor};
use mdb_provision::{Context, Platform, Report, provision};
use mdb_telemetry::TimingGuard;
use mdb_ui::Output;
use tracing::debug;

pub async fn run(args: &InstallArgs, output: &Output) -> Result<i32> {
    let timer = TimingGuard::new("provision");

    let cwd = std::env::current_dir().context("failed to read the working directory")?;

    // Validation happens before anything is touched.
    let inputs = match Inputs::resolve(args.raw_inputs(), &cwd) {
        Ok(inputs) => inputs,
        Err(e) => return Ok(fail(&e, output)),
    };
    let ambient = Ambient::from_env();
    let platform = args.platform.map(Platform::from).unwrap_or_else(Platform::current);

    debug!(%platform, ci = ambient.ci, image = ?ambient.image_os, "Starting provisioning");

    let result = if args.dry_run {
        output.status("Planning", "dry run, commands are printed but not run");
        run_with(&RecordingExecutor::new(), &inputs, &ambient, platform, output, true).await
    } else {
        // Tool output must not interleave with the report on stdout.
        let executor = if args.json {
            SystemExecutor::new().with_stdout_to_stderr()
        } else {
            SystemExecutor::new()
        };
        run_with(&executor, &inputs, &ambient, platform, output, false).await
    };

    match result {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            output.success_summary(
                &format!("MariaDB {} ready", report.version),
                timer.elapsed(),
            );
            Ok(0)
        }
        Err(e) => Ok(fail(&e, output)),
    }
}

async fn run_with(
    executor: &dyn Executor,
    inputs: &Inputs,
    ambient: &Ambient,
    platform: Platform,
    output: &Output,
    dry_run: bool,
) -> mdb_core::Result<Report> {
    let ctx = Context::new(inputs, ambient, executor, output).with_dry_run(dry_run);
    provision(platform, &ctx).await
}

fn fail(error: &Error, output: &Output) -> i32 {
    output.print_error(error);
    exit_code_for(error)
}
