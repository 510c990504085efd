//! Windows application-registration registry access.
//!
//! The registry is only consulted as a last-resort fallback when no
//! filesystem candidate matched on native Windows, and only through the
//! [`RegistryReader`] capability so non-Windows hosts and tests can
//! substitute a stub.

use std::path::PathBuf;

/// Capability for looking up a registered application's executable path.
pub trait RegistryReader: Send + Sync {
    /// Returns the registered executable path for `exe_name` (e.g.
    /// `zen.exe`) from the `App Paths` key, or `None` if the key is absent
    /// or registry access is unsupported on this host.
    fn app_path(&self, exe_name: &str) -> Option<PathBuf>;
}

/// Registry reader for hosts without a Windows registry (and for tests that
/// want the filesystem-only path).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRegistry;

impl RegistryReader for NoopRegistry {
    fn app_path(&self, _exe_name: &str) -> Option<PathBuf> {
        None
    }
}

/// Registry reader backed by the real Windows registry.
#[cfg(windows)]
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsRegistry;

#[cfg(windows)]
impl RegistryReader for WindowsRegistry {
    fn app_path(&self, exe_name: &str) -> Option<PathBuf> {
        use winreg::enums::HKEY_LOCAL_MACHINE;
        use winreg::RegKey;

        let subkey = format!(
            r"SOFTWARE\Microsoft\Windows\CurrentVersion\App Paths\{}",
            exe_name
        );
        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let key = hklm.open_subkey(&subkey).ok()?;
        // The key's default value holds the full executable path.
        let path: String = key.get_value("").ok()?;
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}

/// Returns the registry reader appropriate for the current host.
pub fn platform_registry() -> Box<dyn RegistryReader> {
    #[cfg(windows)]
    return Box::new(WindowsRegistry);
    #[cfg(not(windows))]
    return Box::new(NoopRegistry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_registry_is_always_empty() {
        assert!(NoopRegistry.app_path("zen.exe").is_none());
        assert!(NoopRegistry.app_path("").is_none());
    }
}
