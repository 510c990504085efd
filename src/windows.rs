//! Windows user-profile resolution, including from inside WSL.
//!
//! WSL does not expose the Windows environment directly, so the only
//! reliable cross-boundary query is to shell into the Windows command
//! interpreter and echo `%USERPROFILE%` back. That interpreter may be
//! missing or hang, so the probe runs under a bounded wait and every failure
//! falls through to guessing common usernames under `/mnt/c/Users`.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Default bound on the `cmd.exe` probe.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves the Windows user's profile directory.
///
/// - Native Windows: the `USERPROFILE` environment variable. An unset
///   variable yields `None`, not an error.
/// - WSL: `cmd.exe /c "echo %USERPROFILE%"` rewritten into the `/mnt/<drive>`
///   mount convention; on any failure, the first of `/mnt/c/Users/User` and
///   `/mnt/c/Users/$USER` that exists on disk.
///
/// Exhausting every fallback yields `None`, never an error.
pub async fn resolve_windows_user_profile(is_wsl: bool, timeout: Duration) -> Option<PathBuf> {
    if !is_wsl {
        return std::env::var_os("USERPROFILE").map(PathBuf::from);
    }

    if let Some(profile) = query_userprofile_via_cmd(timeout).await {
        return Some(profile);
    }

    guess_wsl_user_profile(Path::new("/mnt/c/Users"), std::env::var("USER").ok())
}

async fn query_userprofile_via_cmd(timeout: Duration) -> Option<PathBuf> {
    let run = Command::new("cmd.exe")
        .args(["/c", "echo %USERPROFILE%"])
        .output();

    let output = match tokio::time::timeout(timeout, run).await {
        Ok(Ok(output)) if output.status.success() => output,
        Ok(Ok(output)) => {
            debug!(status = %output.status, "cmd.exe probe exited nonzero");
            return None;
        }
        Ok(Err(e)) => {
            debug!(error = %e, "cmd.exe unavailable");
            return None;
        }
        Err(_) => {
            debug!(timeout = ?timeout, "cmd.exe probe timed out");
            return None;
        }
    };

    let windows_path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let rewritten = wsl_path_from_windows(&windows_path);
    if rewritten.is_none() {
        debug!(output = %windows_path, "cmd.exe output is not a drive-letter path");
    }
    rewritten
}

/// Rewrites a Windows drive-letter path into the WSL mount convention:
/// `C:\Users\Bob\AppData` becomes `/mnt/c/Users/Bob/AppData`.
///
/// Input that does not match `<Letter>:\` is a resolution failure and
/// returns `None`; it is never passed through unchanged.
pub fn wsl_path_from_windows(path: &str) -> Option<PathBuf> {
    let mut chars = path.chars();
    let drive = chars.next()?;
    if !drive.is_ascii_alphabetic() || chars.next() != Some(':') || chars.next() != Some('\\') {
        return None;
    }

    let rest = path[3..].replace('\\', "/");
    let mut out = format!("/mnt/{}", drive.to_ascii_lowercase());
    if !rest.is_empty() {
        out.push('/');
        out.push_str(&rest);
    }
    Some(PathBuf::from(out))
}

/// Fallback for when the `cmd.exe` probe fails: tries a short fixed list of
/// plausible usernames under the conventional users directory and returns
/// the first one that exists.
pub fn guess_wsl_user_profile(users_root: &Path, current_user: Option<String>) -> Option<PathBuf> {
    let mut names: Vec<String> = vec!["User".to_string()];
    if let Some(user) = current_user {
        if !user.is_empty() {
            names.push(user);
        }
    }

    for name in names {
        let candidate = users_root.join(&name);
        if candidate.is_dir() {
            return Some(candidate);
        }
    }
    None
}
