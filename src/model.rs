//! Core data types for platform detection and profile discovery.
//!
//! This module contains the fundamental types used throughout sine-create:
//!
//! - [`Browser`] - A browser the toolchain knows about
//! - [`OsFamily`] - Operating system family of the host
//! - [`InstallLocation`] - Where a browser lives when running under WSL
//! - [`PlatformInfo`] - Resolved host environment for one invocation
//! - [`ConfigRoot`] - A verified browser configuration directory
//! - [`Profile`] - One entry parsed from the browser's `profiles.ini`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A browser the toolchain recognizes.
///
/// Only Zen is fully supported today. Firefox is recognized so that user
/// input naming it gets a useful message instead of a parse error, but
/// discovery for it is not implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Zen,
    Firefox,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Zen => "zen",
            Browser::Firefox => "firefox",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Browser::Zen => "Zen Browser",
            Browser::Firefox => "Firefox",
        }
    }

    /// Returns true if profile discovery is implemented for this browser.
    pub fn is_supported(&self) -> bool {
        matches!(self, Browser::Zen)
    }

    /// Directory name used under the platform config roots (`~/.zen`,
    /// `AppData/Roaming/zen`, ...).
    pub fn config_dir_name(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Operating system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Linux,
    MacOS,
    Windows,
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OsFamily::Linux => "linux",
            OsFamily::MacOS => "macos",
            OsFamily::Windows => "windows",
        };
        write!(f, "{}", s)
    }
}

/// Which side of a WSL host the browser is installed on.
///
/// A WSL environment can reach both a Windows-side installation (through
/// `/mnt/<drive>`) and a native Linux one, so when discovery runs under WSL
/// the user picks one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallLocation {
    Windows,
    Linux,
}

impl InstallLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallLocation::Windows => "windows",
            InstallLocation::Linux => "linux",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            InstallLocation::Windows => "Windows (recommended for GUI access)",
            InstallLocation::Linux => "Linux (WSL environment)",
        }
    }
}

/// Resolved host environment, created once per invocation.
///
/// `install_location` is only ever filled in when `is_wsl` is true; on every
/// other host there is exactly one place the browser can live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub os: OsFamily,
    pub is_wsl: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_location: Option<InstallLocation>,
}

impl PlatformInfo {
    pub fn new(os: OsFamily, is_wsl: bool) -> Self {
        Self {
            os,
            is_wsl,
            install_location: None,
        }
    }

    /// Returns true when candidates should be built from Windows-style
    /// user-profile paths: either native Windows, or WSL pointed at a
    /// Windows-side installation.
    pub fn uses_windows_paths(&self) -> bool {
        self.os == OsFamily::Windows
            || (self.is_wsl && self.install_location == Some(InstallLocation::Windows))
    }
}

/// A browser configuration directory that has been verified to contain the
/// profile registry file (`profiles.ini`).
///
/// Construction goes through [`ConfigRoot::verify`], so holding one of these
/// means the registry file existed at the time of the check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRoot {
    path: PathBuf,
}

/// File name of the profile registry inside a configuration root.
pub const PROFILES_INI: &str = "profiles.ini";

impl ConfigRoot {
    /// Promotes a candidate path to a verified configuration root.
    ///
    /// Returns `None` unless the directory exists and contains
    /// `profiles.ini`. Filesystem errors (permissions, races) count as
    /// "not present".
    pub fn verify(candidate: &Path) -> Option<Self> {
        if candidate.is_dir() && candidate.join(PROFILES_INI).is_file() {
            Some(Self {
                path: candidate.to_path_buf(),
            })
        } else {
            None
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the profile registry file under this root.
    pub fn registry_path(&self) -> PathBuf {
        self.path.join(PROFILES_INI)
    }
}

/// One profile entry parsed from the browser's `profiles.ini`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Internal name, derived from the final segment of the `Path=` value.
    pub name: String,
    /// Human-readable name from the `Name=` key.
    pub display_name: String,
    /// Absolute path of the profile's storage directory.
    pub path: PathBuf,
    /// Whether the registry marked this profile with `Default=1`.
    pub is_default: bool,
}

impl Profile {
    /// Label shown in selection menus.
    pub fn label(&self) -> String {
        if self.is_default {
            format!("{} (default)", self.display_name)
        } else {
            self.display_name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_config_root_requires_registry_file() {
        let dir = tempfile::tempdir().unwrap();

        // Directory exists but has no profiles.ini
        assert!(ConfigRoot::verify(dir.path()).is_none());

        fs::write(dir.path().join(PROFILES_INI), "[General]\n").unwrap();
        let root = ConfigRoot::verify(dir.path()).unwrap();
        assert_eq!(root.path(), dir.path());
        assert_eq!(root.registry_path(), dir.path().join("profiles.ini"));
    }

    #[test]
    fn test_config_root_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(ConfigRoot::verify(&missing).is_none());
    }

    #[test]
    fn test_uses_windows_paths() {
        let native = PlatformInfo::new(OsFamily::Windows, false);
        assert!(native.uses_windows_paths());

        let mut wsl = PlatformInfo::new(OsFamily::Linux, true);
        assert!(!wsl.uses_windows_paths());
        wsl.install_location = Some(InstallLocation::Windows);
        assert!(wsl.uses_windows_paths());

        let linux = PlatformInfo::new(OsFamily::Linux, false);
        assert!(!linux.uses_windows_paths());
    }

    #[test]
    fn test_browser_support() {
        assert!(Browser::Zen.is_supported());
        assert!(!Browser::Firefox.is_supported());
        assert_eq!(Browser::Zen.as_str(), "zen");
        assert_eq!(Browser::Zen.to_string(), "Zen Browser");
    }

    #[test]
    fn test_profile_label() {
        let profile = Profile {
            name: "default-release".into(),
            display_name: "default".into(),
            path: PathBuf::from("/x/default-release"),
            is_default: true,
        };
        assert_eq!(profile.label(), "default (default)");
    }
}
