//! Platform identification for scanner archive selection.
//!
//! The detected OS family and architecture drive archive filename
//! construction. They are modeled as an explicitly constructed immutable
//! value passed into the acquisition layer rather than read ambiently, so
//! the install flow stays testable across platforms.

use serde::{Deserialize, Serialize};

/// Platform identifier combining OS and architecture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Create a new platform.
    #[must_use]
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Get the current platform.
    #[must_use]
    pub fn current() -> Self {
        Self {
            os: Os::current(),
            arch: Arch::current(),
        }
    }

    /// Archive extension for this platform's release assets.
    #[must_use]
    pub fn archive_ext(&self) -> &'static str {
        match self.os {
            Os::Windows => ".zip",
            Os::Darwin | Os::Linux => ".tar.gz",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Windows,
    Darwin,
    Linux,
}

impl Os {
    /// Get the current OS.
    #[must_use]
    pub fn current() -> Self {
        #[cfg(target_os = "windows")]
        return Self::Windows;
        #[cfg(target_os = "macos")]
        return Self::Darwin;
        #[cfg(target_os = "linux")]
        return Self::Linux;
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        compile_error!("Unsupported OS");
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "windows" | "win32" => Some(Self::Windows),
            "darwin" | "macos" => Some(Self::Darwin),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }

    /// Label used in upstream release archive filenames.
    #[must_use]
    pub fn archive_label(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Darwin => "macOS",
            Self::Linux => "Linux",
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Darwin => write!(f, "darwin"),
            Self::Linux => write!(f, "linux"),
        }
    }
}

/// CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X64,
    Ia32,
    Arm64,
}

impl Arch {
    /// Get the current architecture.
    #[must_use]
    pub fn current() -> Self {
        #[cfg(target_arch = "x86_64")]
        return Self::X64;
        #[cfg(target_arch = "x86")]
        return Self::Ia32;
        #[cfg(target_arch = "aarch64")]
        return Self::Arm64;
        #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
        compile_error!("Unsupported architecture");
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "x64" | "x86_64" | "amd64" => Some(Self::X64),
            "ia32" | "x86" | "386" => Some(Self::Ia32),
            "arm64" | "aarch64" => Some(Self::Arm64),
            _ => None,
        }
    }

    /// Label used in upstream release archive filenames.
    ///
    /// 64/32-bit x86 map to bit-width labels; unmapped architectures keep
    /// their raw name.
    #[must_use]
    pub fn archive_label(&self) -> &'static str {
        match self {
            Self::X64 => "64bit",
            Self::Ia32 => "32bit",
            Self::Arm64 => "arm64",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X64 => write!(f, "x64"),
            Self::Ia32 => write!(f, "ia32"),
            Self::Arm64 => write!(f, "arm64"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_parse() {
        assert_eq!(Os::parse("darwin"), Some(Os::Darwin));
        assert_eq!(Os::parse("macos"), Some(Os::Darwin));
        assert_eq!(Os::parse("linux"), Some(Os::Linux));
        assert_eq!(Os::parse("win32"), Some(Os::Windows));
        assert_eq!(Os::parse("plan9"), None);
    }

    #[test]
    fn test_arch_parse() {
        assert_eq!(Arch::parse("x64"), Some(Arch::X64));
        assert_eq!(Arch::parse("amd64"), Some(Arch::X64));
        assert_eq!(Arch::parse("ia32"), Some(Arch::Ia32));
        assert_eq!(Arch::parse("aarch64"), Some(Arch::Arm64));
        assert_eq!(Arch::parse("mips"), None);
    }

    #[test]
    fn test_archive_labels() {
        assert_eq!(Os::Windows.archive_label(), "Windows");
        assert_eq!(Os::Darwin.archive_label(), "macOS");
        assert_eq!(Os::Linux.archive_label(), "Linux");
        assert_eq!(Arch::X64.archive_label(), "64bit");
        assert_eq!(Arch::Ia32.archive_label(), "32bit");
        assert_eq!(Arch::Arm64.archive_label(), "arm64");
    }

    #[test]
    fn test_archive_ext() {
        assert_eq!(Platform::new(Os::Windows, Arch::X64).archive_ext(), ".zip");
        assert_eq!(Platform::new(Os::Linux, Arch::X64).archive_ext(), ".tar.gz");
        assert_eq!(
            Platform::new(Os::Darwin, Arch::Arm64).archive_ext(),
            ".tar.gz"
        );
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(
            Platform::new(Os::Linux, Arch::Arm64).to_string(),
            "linux-arm64"
        );
    }

    #[test]
    fn test_platform_current() {
        let p = Platform::current();
        assert!(matches!(p.os, Os::Windows | Os::Darwin | Os::Linux));
    }
}
