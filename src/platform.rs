//! Host platform detection.
//!
//! Maps the running kernel to an [`OsFamily`] and, for linux-like hosts,
//! probes the kernel release string to decide whether the process is running
//! inside WSL. Detection never fails: every probe that can go wrong degrades
//! to a default instead of returning an error.

use crate::model::{OsFamily, PlatformInfo};
use tokio::process::Command;
use tracing::debug;

/// Detects the host platform.
///
/// Windows and macOS are resolved directly from the compile target. For the
/// residual linux-like case the kernel release string (`uname -r`) is probed
/// for a WSL marker; if the probe itself fails, the host is treated as plain
/// Linux.
pub async fn detect_platform() -> PlatformInfo {
    let os = current_os();

    let is_wsl = match os {
        OsFamily::Linux => match kernel_release().await {
            Some(release) => is_wsl_kernel(&release),
            None => false,
        },
        _ => false,
    };

    classify(os, is_wsl)
}

/// Pure classification step, split out so tests can drive it without
/// spawning `uname`.
pub fn classify(os: OsFamily, is_wsl: bool) -> PlatformInfo {
    // WSL only makes sense on a linux-like host.
    let is_wsl = is_wsl && os == OsFamily::Linux;
    PlatformInfo::new(os, is_wsl)
}

/// Returns true if a kernel release string indicates a WSL compatibility
/// layer ("microsoft" or "wsl", case-insensitive).
pub fn is_wsl_kernel(release: &str) -> bool {
    let release = release.to_lowercase();
    release.contains("microsoft") || release.contains("wsl")
}

fn current_os() -> OsFamily {
    #[cfg(target_os = "windows")]
    return OsFamily::Windows;
    #[cfg(target_os = "macos")]
    return OsFamily::MacOS;
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    return OsFamily::Linux;
}

async fn kernel_release() -> Option<String> {
    match Command::new("uname").arg("-r").output().await {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(output) => {
            debug!(status = %output.status, "uname -r exited nonzero");
            None
        }
        Err(e) => {
            debug!(error = %e, "uname -r unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wsl_kernel_markers() {
        assert!(is_wsl_kernel("5.15.167.4-microsoft-standard-WSL2"));
        assert!(is_wsl_kernel("4.4.0-19041-Microsoft"));
        assert!(is_wsl_kernel("6.6.0-wsl2"));
        assert!(!is_wsl_kernel("6.8.0-45-generic"));
        assert!(!is_wsl_kernel(""));
    }

    #[test]
    fn test_classify_per_family() {
        let info = classify(OsFamily::Linux, true);
        assert_eq!(info.os, OsFamily::Linux);
        assert!(info.is_wsl);
        assert!(info.install_location.is_none());

        let info = classify(OsFamily::Linux, false);
        assert!(!info.is_wsl);

        // WSL flag is meaningless off Linux and gets dropped.
        let info = classify(OsFamily::Windows, true);
        assert_eq!(info.os, OsFamily::Windows);
        assert!(!info.is_wsl);

        let info = classify(OsFamily::MacOS, true);
        assert_eq!(info.os, OsFamily::MacOS);
        assert!(!info.is_wsl);
    }

    #[tokio::test]
    async fn test_detect_platform_never_fails() {
        // Whatever the host, detection must complete and agree with the
        // compile target on the OS family.
        let info = detect_platform().await;
        if cfg!(target_os = "linux") {
            assert_eq!(info.os, OsFamily::Linux);
        } else {
            assert!(!info.is_wsl);
        }
    }
}
