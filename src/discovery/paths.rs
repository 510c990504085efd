//! Candidate path probing for browser configuration roots.
//!
//! Each supported browser has an ordered list of plausible configuration
//! locations per OS family. Candidates are evaluated strictly in order and
//! the first one that exists and contains `profiles.ini` wins; there is no
//! scoring across candidates. On native Windows the application-registration
//! registry is consulted as a last resort when no filesystem candidate
//! matched.
//!
//! Candidate locations for Zen:
//! - Linux: `~/.zen`, `~/.config/zen`, `~/.local/share/zen`
//! - macOS: `~/Library/Application Support/zen`, `~/.zen`
//! - Windows (native or via WSL): `<UserProfile>/AppData/Roaming/zen`,
//!   `<UserProfile>/AppData/Local/zen`, `<UserProfile>/.zen`, then the
//!   common Program Files install locations on the system drive.

use crate::discovery::registry::RegistryReader;
use crate::error::DiscoveryError;
use crate::model::{Browser, ConfigRoot, OsFamily, PlatformInfo};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Confirms a path is a genuine browser installation root.
///
/// Pure existence check of the profile registry file; filesystem errors
/// (permission denied, races) count as "not valid".
pub fn is_valid_installation(path: &Path) -> bool {
    ConfigRoot::verify(path).is_some()
}

/// Builds the ordered candidate list for `browser` on the resolved platform.
///
/// `home` is the user's home directory (Linux/macOS candidates);
/// `windows_user_profile` is the resolved Windows user profile (Windows and
/// WSL-pointed-at-Windows candidates). Either may be absent, in which case
/// the corresponding candidates are simply not generated.
///
/// # Errors
///
/// Returns [`DiscoveryError::UnsupportedBrowser`] for a browser the prober
/// was never taught; callers must validate against the supported set first.
pub fn candidate_paths(
    browser: Browser,
    platform: &PlatformInfo,
    home: Option<&Path>,
    windows_user_profile: Option<&Path>,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !browser.is_supported() {
        return Err(DiscoveryError::UnsupportedBrowser(browser));
    }
    let name = browser.config_dir_name();

    let mut candidates = Vec::new();

    if platform.uses_windows_paths() {
        if let Some(profile) = windows_user_profile {
            candidates.push(profile.join("AppData").join("Roaming").join(name));
            candidates.push(profile.join("AppData").join("Local").join(name));
            candidates.push(profile.join(format!(".{}", name)));
        }
        // Later fallback: common install locations on the system drive.
        let system_drive = if platform.is_wsl {
            PathBuf::from("/mnt/c")
        } else {
            PathBuf::from(r"C:\")
        };
        for program_files in ["Program Files", "Program Files (x86)"] {
            candidates.push(
                system_drive
                    .join(program_files)
                    .join("Zen Browser")
                    .join(name),
            );
            candidates.push(system_drive.join(program_files).join(name).join(name));
        }
    } else {
        match platform.os {
            OsFamily::Linux => {
                if let Some(home) = home {
                    candidates.push(home.join(format!(".{}", name)));
                    candidates.push(home.join(".config").join(name));
                    candidates.push(home.join(".local").join("share").join(name));
                }
            }
            OsFamily::MacOS => {
                if let Some(home) = home {
                    candidates.push(home.join("Library").join("Application Support").join(name));
                    candidates.push(home.join(format!(".{}", name)));
                }
            }
            // uses_windows_paths() covers native Windows; a WSL host that
            // picked the Linux side falls through to the Linux list above.
            OsFamily::Windows => {}
        }
    }

    Ok(candidates)
}

/// Walks `candidates` in order and returns the first verified hit.
pub fn probe_candidates(candidates: &[PathBuf]) -> Option<ConfigRoot> {
    for candidate in candidates {
        match ConfigRoot::verify(candidate) {
            Some(root) => {
                debug!(path = %candidate.display(), "candidate verified");
                return Some(root);
            }
            None => {
                debug!(path = %candidate.display(), "candidate failed");
            }
        }
    }
    None
}

/// Locates the browser's configuration root.
///
/// Probes the filesystem candidates in order; if none hit and the platform
/// is native Windows, derives a neighboring configuration directory from the
/// registry-registered executable path and tests it the same way.
///
/// Returns `Ok(None)` when nothing was found anywhere — discovery failure is
/// a clean outcome, not an error.
pub fn find_config_root(
    browser: Browser,
    platform: &PlatformInfo,
    home: Option<&Path>,
    windows_user_profile: Option<&Path>,
    registry: &dyn RegistryReader,
) -> Result<Option<ConfigRoot>, DiscoveryError> {
    let candidates = candidate_paths(browser, platform, home, windows_user_profile)?;

    if let Some(root) = probe_candidates(&candidates) {
        return Ok(Some(root));
    }

    // Registry fallback only applies on native Windows; WSL cannot reach the
    // host registry without the same interpreter probe that already failed.
    if platform.os == OsFamily::Windows && !platform.is_wsl {
        if let Some(root) = probe_registry(browser, registry) {
            return Ok(Some(root));
        }
    }

    Ok(None)
}

fn probe_registry(browser: Browser, registry: &dyn RegistryReader) -> Option<ConfigRoot> {
    let exe_name = format!("{}.exe", browser.as_str());
    let exe_path = registry.app_path(&exe_name)?;
    debug!(exe = %exe_path.display(), "registry reported installation");

    // The config directory sits next to the registered executable.
    let install_dir = exe_path.parent()?;
    ConfigRoot::verify(&install_dir.join(browser.config_dir_name()))
}
