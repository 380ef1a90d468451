//! Host platform detection.

use serde::Serialize;

/// CPU architecture, as far as installer paths care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// Apple Silicon / aarch64
    Arm64,
    /// Anything else, treated as x86_64
    X86_64,
}

impl Arch {
    /// Map a `std::env::consts::ARCH` value.
    pub fn from_name(arch: &str) -> Self {
        match arch {
            "aarch64" | "arm64" => Self::Arm64,
            _ => Self::X86_64,
        }
    }
}

/// Platforms with a provisioning path.
///
/// Linux is the fallback for every host that is neither macOS nor Windows;
/// unsupported distributions simply fail in their package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "os", rename_all = "lowercase")]
pub enum Platform {
    /// macOS via Homebrew
    #[serde(rename = "macos")]
    MacOs { arch: Arch },
    /// Windows via the MSI installer
    Windows,
    /// Linux via apt
    Linux,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        Self::from_parts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Map an OS and architecture name to a platform.
    pub fn from_parts(os: &str, arch: &str) -> Self {
        match os {
            "macos" => Self::MacOs {
                arch: Arch::from_name(arch),
            },
            "windows" => Self::Windows,
            _ => Self::Linux,
        }
    }

    /// Get a human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MacOs { arch: Arch::Arm64 } => "macos (arm64)",
            Self::MacOs { arch: Arch::X86_64 } => "macos (x86_64)",
            Self::Windows => "windows",
            Self::Linux => "linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
