//! Telemetry and tracing for setup-mariadb.
//!
//! This crate provides:
//! - Structured logging setup
//! - Timing measurements
//! - JSON log output for debugging

use mdb_core::EnvVars;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Default filter directives, keyed on the verbose flag.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "setup_mariadb=debug,mdb=debug"
    } else {
        "setup_mariadb=warn,mdb=warn"
    }
}

/// Initialize the tracing subscriber.
///
/// This sets up logging based on the RUST_LOG environment variable
/// and the verbose flag. Logs go to stderr.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let subscriber = tracing_subscriber::registry().with(filter);

    if std::env::var(EnvVars::MDB_LOG_JSON).is_ok() {
        let json_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        let _ = subscriber.with(json_layer).try_init();
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(false)
            .without_time();

        let _ = subscriber.with(fmt_layer).try_init();
    }
}

/// A timing guard that logs duration on drop.
pub struct TimingGuard {
    name: String,
    start: std::time::Instant,
}

impl TimingGuard {
    /// Start timing an operation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: std::time::Instant::now(),
        }
    }

    /// Time elapsed since the guard was created.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis() as u64,
            "Operation completed"
        );
    }
}
