//! Supported MariaDB release series.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A MariaDB release series that can be provisioned.
///
/// Only LTS series are added going forward. The set is closed: anything
/// not listed here is rejected during input resolution, before any
/// command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MariaDbVersion {
    #[serde(rename = "11.4")]
    V11_4,
    #[serde(rename = "11.2")]
    V11_2,
    #[serde(rename = "11.1")]
    V11_1,
    #[serde(rename = "10.11")]
    V10_11,
    #[serde(rename = "10.6")]
    V10_6,
    #[serde(rename = "10.5")]
    V10_5,
}

impl MariaDbVersion {
    /// All supported series, newest first.
    pub const ALL: [MariaDbVersion; 6] = [
        Self::V11_4,
        Self::V11_2,
        Self::V11_1,
        Self::V10_11,
        Self::V10_6,
        Self::V10_5,
    ];

    /// The latest LTS series, used when no version is requested.
    pub const DEFAULT: MariaDbVersion = Self::V11_4;

    /// The short series identifier (e.g. `11.4`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V11_4 => "11.4",
            Self::V11_2 => "11.2",
            Self::V11_1 => "11.1",
            Self::V10_11 => "10.11",
            Self::V10_6 => "10.6",
            Self::V10_5 => "10.5",
        }
    }

    /// The full release published as a Windows MSI for this series.
    pub fn windows_release(&self) -> &'static str {
        match self {
            Self::V11_4 => "11.4.3",
            Self::V11_2 => "11.2.2",
            Self::V11_1 => "11.1.2",
            Self::V10_11 => "10.11.6",
            Self::V10_6 => "10.6.16",
            Self::V10_5 => "10.5.23",
        }
    }

    /// Comma-separated list of supported series, for messages.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for MariaDbVersion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for MariaDbVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a supported series.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid MariaDB version: {0}")]
pub struct UnsupportedVersion(pub String);

impl FromStr for MariaDbVersion {
    type Err = UnsupportedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnsupportedVersion(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported() {
        assert_eq!("11.4".parse::<MariaDbVersion>(), Ok(MariaDbVersion::V11_4));
        assert_eq!("10.11".parse::<MariaDbVersion>(), Ok(MariaDbVersion::V10_11));
        assert_eq!("10.5".parse::<MariaDbVersion>(), Ok(MariaDbVersion::V10_5));
    }

    #[test]
    fn test_parse_rejects_unlisted() {
        for input in ["11.0", "10.4", "11.4.3", "", " 11.4", "latest", "11"] {
            let err = input.parse::<MariaDbVersion>().unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid MariaDB version: {}", input));
        }
    }

    #[test]
    fn test_windows_release_is_dotted() {
        for version in MariaDbVersion::ALL {
            let release = version.windows_release();
            assert!(release.starts_with(&format!("{}.", version.as_str())));
            assert_eq!(release.split('.').count(), 3);
            assert!(release.split('.').all(|p| p.parse::<u32>().is_ok()));
        }
    }

    #[test]
    fn test_round_trip_display() {
        for version in MariaDbVersion::ALL {
            assert_eq!(version.to_string().parse::<MariaDbVersion>(), Ok(version));
        }
    }

    #[test]
    fn test_default_is_latest_lts() {
        assert_eq!(MariaDbVersion::default(), MariaDbVersion::V11_4);
        assert_eq!(
            MariaDbVersion::supported_list(),
            "11.4, 11.2, 11.1, 10.11, 10.6, 10.5"
        );
    }
}
