//! Ambient CI environment.

use mdb_core::EnvVars;
use std::path::PathBuf;

/// Runner images whose preinstalled MySQL must be cleared before install.
pub const CLEANUP_IMAGES: &[&str] = &["ubuntu20", "ubuntu22", "ubuntu24"];

/// Variables provided by the CI runner rather than the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ambient {
    /// Whether the `CI` marker is set.
    pub ci: bool,
    /// Runner image identifier, e.g. `ubuntu22`.
    pub image_os: Option<String>,
    /// PATH-registration file.
    pub github_path: Option<PathBuf>,
    /// Name of the invoking account.
    pub user: Option<String>,
}

impl Ambient {
    /// Read the ambient variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the ambient variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            ci: lookup(EnvVars::CI).is_some(),
            image_os: get(EnvVars::IMAGE_OS),
            github_path: get(EnvVars::GITHUB_PATH).map(PathBuf::from),
            user: get(EnvVars::USER).or_else(|| get(EnvVars::USERNAME)),
        }
    }

    /// Whether the runner image ships a MySQL install that must be cleared.
    pub fn needs_cleanup(&self) -> bool {
        self.image_os
            .as_deref()
            .is_some_and(|image| CLEANUP_IMAGES.contains(&image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ambient(vars: &[(&str, &str)]) -> Ambient {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Ambient::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_reads_runner_variables() {
        let a = ambient(&[
            ("CI", "true"),
            ("ImageOS", "ubuntu22"),
            ("GITHUB_PATH", "/home/runner/work/_temp/_runner_file_commands/add_path"),
            ("USER", "runner"),
        ]);
        assert!(a.ci);
        assert_eq!(a.image_os.as_deref(), Some("ubuntu22"));
        assert_eq!(
            a.github_path,
            Some(PathBuf::from("/home/runner/work/_temp/_runner_file_commands/add_path"))
        );
        assert_eq!(a.user.as_deref(), Some("runner"));
    }

    #[test]
    fn test_username_fallback() {
        let a = ambient(&[("USERNAME", "runneradmin")]);
        assert_eq!(a.user.as_deref(), Some("runneradmin"));
        assert!(!a.ci);
    }

    #[test]
    fn test_cleanup_images() {
        for image in ["ubuntu20", "ubuntu22", "ubuntu24"] {
            assert!(ambient(&[("ImageOS", image)]).needs_cleanup());
        }
        for image in ["ubuntu18", "debian12", "Ubuntu22", ""] {
            assert!(!ambient(&[("ImageOS", image)]).needs_cleanup());
        }
        assert!(!Ambient::default().needs_cleanup());
    }
}
