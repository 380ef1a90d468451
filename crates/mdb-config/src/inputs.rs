//! Action inputs and their resolution.

use crate::paths::normalize_dir;
use crate::{DEFAULT_DOWNLOAD_DIR, DEFAULT_MIRROR};
use mdb_core::{Error, Fix, MariaDbVersion, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Inputs as supplied by the caller, before defaults and validation.
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub mariadb_version: Option<String>,
    pub database: Option<String>,
    pub download_dir: Option<String>,
    pub mirror: Option<String>,
    pub download_getopt: Option<String>,
}

/// Validated provisioning inputs. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inputs {
    /// Release series to install.
    pub version: MariaDbVersion,
    /// Database to create after installation.
    pub database: Option<String>,
    /// Absolute directory for cached installer downloads.
    pub download_dir: PathBuf,
    /// Mirror base URL, without a trailing slash.
    pub mirror: String,
    /// Query string appended to download URLs (without the `?`).
    pub download_query: Option<String>,
}

impl Inputs {
    /// Apply defaults to `raw` and validate it.
    ///
    /// Fails on an unsupported version. Has no side effects, so nothing has
    /// been touched when it fails.
    pub fn resolve(raw: RawInputs, cwd: &Path) -> Result<Self> {
        let version = match non_empty(raw.mariadb_version) {
            Some(v) => v.parse::<MariaDbVersion>().map_err(|e| {
                Error::config_with_fix(
                    e.to_string(),
                    Fix::new(format!(
                        "Use one of the supported versions: {}",
                        MariaDbVersion::supported_list()
                    )),
                )
            })?,
            None => MariaDbVersion::DEFAULT,
        };

        let download_dir = normalize_dir(
            non_empty(raw.download_dir)
                .as_deref()
                .unwrap_or(DEFAULT_DOWNLOAD_DIR),
            cwd,
        );

        let mirror = non_empty(raw.mirror)
            .unwrap_or_else(|| DEFAULT_MIRROR.to_string())
            .trim_end_matches('/')
            .to_string();

        let inputs = Self {
            version,
            database: non_empty(raw.database),
            download_dir,
            mirror,
            download_query: non_empty(raw.download_getopt),
        };

        debug!(?inputs, "Resolved inputs");
        Ok(inputs)
    }

    /// The `?<opts>` suffix for download URLs, or an empty string.
    pub fn download_suffix(&self) -> String {
        match &self.download_query {
            Some(query) => format!("?{}", query),
            None => String::new(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> PathBuf {
        std::env::current_dir().unwrap()
    }

    #[test]
    fn test_defaults() {
        let inputs = Inputs::resolve(RawInputs::default(), &cwd()).unwrap();
        assert_eq!(inputs.version, MariaDbVersion::V11_4);
        assert_eq!(inputs.database, None);
        assert_eq!(inputs.mirror, "https://dlm.mariadb.com");
        assert_eq!(inputs.download_query, None);
        assert_eq!(inputs.download_suffix(), "");
        assert_eq!(inputs.download_dir, cwd().join(".cache").join("mariadb"));
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let raw = RawInputs {
            mariadb_version: Some(String::new()),
            database: Some(String::new()),
            download_dir: Some(String::new()),
            mirror: Some(String::new()),
            download_getopt: Some(String::new()),
        };
        let inputs = Inputs::resolve(raw, &cwd()).unwrap();
        assert_eq!(inputs, Inputs::resolve(RawInputs::default(), &cwd()).unwrap());
    }

    #[test]
    fn test_explicit_values() {
        let raw = RawInputs {
            mariadb_version: Some("10.6".into()),
            database: Some("testdb".into()),
            download_dir: Some("dl".into()),
            mirror: Some("https://mirror.example.org/".into()),
            download_getopt: Some("token=abc".into()),
        };
        let inputs = Inputs::resolve(raw, &cwd()).unwrap();
        assert_eq!(inputs.version, MariaDbVersion::V10_6);
        assert_eq!(inputs.database.as_deref(), Some("testdb"));
        assert_eq!(inputs.download_dir, cwd().join("dl"));
        assert_eq!(inputs.mirror, "https://mirror.example.org");
        assert_eq!(inputs.download_suffix(), "?token=abc");
    }

    #[test]
    fn test_invalid_version_is_config_error() {
        for bad in ["11.0", "10.4", "9.9", "11.4.3", "mariadb"] {
            let raw = RawInputs {
                mariadb_version: Some(bad.into()),
                ..Default::default()
            };
            let err = Inputs::resolve(raw, &cwd()).unwrap_err();
            assert_eq!(err.code(), mdb_core::ErrorCode::ConfigError);
            assert!(err.to_string().contains(&format!("Invalid MariaDB version: {}", bad)));
            assert!(err.fixes()[0].description.contains("10.11"));
        }
    }

    #[test]
    fn test_mirror_is_taken_as_given() {
        let raw = RawInputs {
            mirror: Some("https://mirror.example.org/a&b//".into()),
            ..Default::default()
        };
        let inputs = Inputs::resolve(raw, &cwd()).unwrap();
        assert_eq!(inputs.mirror, "https://mirror.example.org/a&b");
    }

    #[test]
    fn test_serializes_version_as_series() {
        let inputs = Inputs::resolve(RawInputs::default(), &cwd()).unwrap();
        let json = serde_json::to_value(&inputs).unwrap();
        assert_eq!(json["version"], "11.4");
    }
}
