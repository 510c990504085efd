//! Profile registry parsing and selection.
//!
//! `profiles.ini` is a line-oriented INI-like file. Only sections whose name
//! begins with `Profile` produce entries; everything else (`[General]`,
//! `[Install...]`, vendor extensions) is ignored. The parser is lenient:
//! malformed lines and unknown keys are skipped, and missing `Name=`/`Path=`
//! values default to empty strings.

use crate::error::DiscoveryError;
use crate::model::{ConfigRoot, Profile};
use crate::prompt::Prompter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Reads and parses the profile registry under `root`.
///
/// # Errors
///
/// Returns [`DiscoveryError::RegistryRead`] if the registry file cannot be
/// read. The root was verified when constructed, so this indicates a race or
/// a permissions problem worth surfacing.
pub fn load_profiles(root: &ConfigRoot) -> Result<Vec<Profile>, DiscoveryError> {
    let registry_path = root.registry_path();
    let text = fs::read_to_string(&registry_path).map_err(|source| {
        DiscoveryError::RegistryRead {
            path: registry_path,
            source,
        }
    })?;
    Ok(parse_profiles(&text, root.path()))
}

/// Parses profile registry text into structured entries.
///
/// Relative `Path=` values are resolved against `root`; values that are
/// already absolute (leading `/` or a drive-letter prefix like `C:`) are
/// kept verbatim. Entry order reflects file order; presentation reordering
/// happens in [`order_for_display`].
pub fn parse_profiles(text: &str, root: &Path) -> Vec<Profile> {
    let mut profiles = Vec::new();
    let mut section: Option<String> = None;
    let mut current = PartialProfile::default();

    for line in text.lines() {
        let line = line.trim();

        if line.starts_with('[') && line.ends_with(']') {
            flush(&mut profiles, section.as_deref(), &mut current);
            section = Some(line[1..line.len() - 1].to_string());
            continue;
        }

        let in_profile_section = section
            .as_deref()
            .map(|s| s.starts_with("Profile"))
            .unwrap_or(false);
        if !in_profile_section {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        match key.to_lowercase().as_str() {
            "name" => current.display_name = Some(value.to_string()),
            "path" => {
                current.path = Some(resolve_profile_path(value, root));
                // Internal name is the final segment of the raw value.
                current.name = value.rsplit(['/', '\\']).next().map(str::to_string);
            }
            "default" => current.is_default = value == "1",
            _ => {}
        }
    }

    // End of input flushes exactly like a section boundary.
    flush(&mut profiles, section.as_deref(), &mut current);
    profiles
}

#[derive(Default)]
struct PartialProfile {
    name: Option<String>,
    display_name: Option<String>,
    path: Option<PathBuf>,
    is_default: bool,
}

fn flush(profiles: &mut Vec<Profile>, section: Option<&str>, current: &mut PartialProfile) {
    let current = std::mem::take(current);
    let is_profile = section.map(|s| s.starts_with("Profile")).unwrap_or(false);
    if !is_profile || current.name.is_none() {
        return;
    }

    let name = current.name.unwrap_or_default();
    profiles.push(Profile {
        display_name: current.display_name.unwrap_or_else(|| name.clone()),
        name,
        path: current.path.unwrap_or_default(),
        is_default: current.is_default,
    });
}

fn resolve_profile_path(value: &str, root: &Path) -> PathBuf {
    if value.starts_with('/') || is_drive_letter_path(value) {
        PathBuf::from(value)
    } else {
        root.join(value)
    }
}

fn is_drive_letter_path(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Reorders profiles for presentation: default-marked entries first, the
/// rest by case-insensitive display name. The sort is stable, so when
/// multiple entries claim `Default=1` the first one encountered leads.
pub fn order_for_display(profiles: &[Profile]) -> Vec<Profile> {
    let mut ordered = profiles.to_vec();
    ordered.sort_by(|a, b| {
        b.is_default.cmp(&a.is_default).then_with(|| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
        })
    });
    ordered
}

/// Arbitrates among discovered profiles.
///
/// - Empty input yields `None` ("no profiles found").
/// - A single candidate is auto-selected without prompting.
/// - Otherwise the prompt layer picks from the display-ordered list.
///
/// After the choice, the profile's storage directory is checked on disk; a
/// missing directory is warned about but the entry is still returned, since
/// the browser may simply never have been launched with it.
pub async fn select_profile(
    profiles: &[Profile],
    prompter: &dyn Prompter,
) -> Result<Option<Profile>, DiscoveryError> {
    if profiles.is_empty() {
        info!("no profiles found in registry");
        return Ok(None);
    }

    let mut ordered = order_for_display(profiles);
    let index = if ordered.len() == 1 {
        0
    } else {
        let labels: Vec<String> = ordered.iter().map(|p| p.label()).collect();
        prompter
            .select("Select a browser profile", &labels, 0)
            .await?
    };
    if index >= ordered.len() {
        return Ok(None);
    }
    let chosen = ordered.swap_remove(index);

    if !chosen.path.as_os_str().is_empty() && !chosen.path.is_dir() {
        warn!(
            path = %chosen.path.display(),
            "selected profile directory does not exist yet"
        );
    }

    Ok(Some(chosen))
}
