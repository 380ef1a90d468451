//! Exporting the client binary directory to later CI steps.

use mdb_core::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Append `bin_dir` as one line to the PATH-registration file.
///
/// Returns `false` without touching anything when no file is configured.
pub fn export_path(bin_dir: &Path, path_file: Option<&Path>) -> Result<bool> {
    let Some(path_file) = path_file else {
        warn!(
            "No PATH-registration file configured; {} was not exported",
            bin_dir.display()
        );
        return Ok(false);
    };

    debug!("Adding {} to {}", bin_dir.display(), path_file.display());

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path_file)
        .map_err(|e| Error::io("failed to open PATH file", path_file, e))?;

    writeln!(file, "{}", bin_dir.display())
        .map_err(|e| Error::io("failed to write PATH file", path_file, e))?;

    Ok(true)
}
