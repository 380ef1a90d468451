//! Platform detection and MariaDB installers for setup-mariadb.
//!
//! This crate handles:
//! - Detecting the host platform
//! - Installing and starting MariaDB with Homebrew, the MSI, or apt
//! - Creating the passwordless administrative user
//! - Exporting the client binaries to later CI steps
//! - Creating the requested database

pub mod database;
pub mod installer;
pub mod linux;
pub mod macos;
pub mod path;
pub mod platform;
pub mod provision;
pub mod windows;

pub use database::{create_database, create_database_command};
pub use installer::{Context, Installer, admin_user_statements};
pub use linux::AptInstaller;
pub use macos::Homebrew;
pub use path::export_path;
pub use platform::{Arch, Platform};
pub use provision::{Report, installer_for, provision, provision_with};
pub use windows::{MsiInstaller, msi_download_url};

#[cfg(test)]
pub(crate) mod testing {
    use crate::installer::Context;
    use mdb_config::{Ambient, Inputs, RawInputs};
    use mdb_core::RecordingExecutor;
    use mdb_ui::{Output, Verbosity};

    /// Owned pieces of a [`Context`] for installer tests.
    pub struct Fixture {
        pub inputs: Inputs,
        pub ambient: Ambient,
        pub executor: RecordingExecutor,
        pub output: Output,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self::with_raw(RawInputs::default())
        }

        pub fn with_raw(raw: RawInputs) -> Self {
            let cwd = std::env::current_dir().unwrap();
            Self {
                inputs: Inputs::resolve(raw, &cwd).unwrap(),
                ambient: Ambient {
                    user: Some("runner".to_string()),
                    ..Default::default()
                },
                executor: RecordingExecutor::new(),
                output: Output::with_verbosity(Verbosity::Silent),
            }
        }

        pub fn ctx(&self) -> Context<'_> {
            Context::new(&self.inputs, &self.ambient, &self.executor, &self.output)
        }
    }
}
