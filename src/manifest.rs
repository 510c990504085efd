//! Project manifest updates.
//!
//! The scaffolded project carries a JSON manifest (its `package.json`). The
//! only mutation discovery performs is setting the `browser_profiles` field
//! to a one-element array holding the discovered profile path. When
//! discovery failed the field is left out entirely and the user fills it in
//! by hand later.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Key written into the project manifest.
pub const BROWSER_PROFILES_KEY: &str = "browser_profiles";

/// Writes the discovered profile path into the manifest at `path`,
/// preserving every other field and pretty-printing the result.
pub fn write_profile_path(path: &Path, profile_path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest at {}", path.display()))?;
    let mut manifest: Value = serde_json::from_str(&content)
        .with_context(|| format!("manifest at {} is not valid JSON", path.display()))?;

    set_browser_profiles(&mut manifest, profile_path)?;

    let serialized = serde_json::to_string_pretty(&manifest)?;
    fs::write(path, serialized + "\n")
        .with_context(|| format!("failed to write manifest at {}", path.display()))?;
    Ok(())
}

fn set_browser_profiles(manifest: &mut Value, profile_path: &Path) -> Result<()> {
    let object = manifest
        .as_object_mut()
        .context("manifest root is not a JSON object")?;
    object.insert(
        BROWSER_PROFILES_KEY.to_string(),
        json!([profile_path.to_string_lossy()]),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_write_profile_path_preserves_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("package.json");
        fs::write(
            &manifest_path,
            r#"{"name": "my-mod", "version": "0.1.0", "scripts": {"dev": "sine dev"}}"#,
        )
        .unwrap();

        write_profile_path(&manifest_path, &PathBuf::from("/home/u/.zen/default-release"))
            .unwrap();

        let value: Value =
            serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
        assert_eq!(value["name"], "my-mod");
        assert_eq!(value["scripts"]["dev"], "sine dev");
        assert_eq!(
            value[BROWSER_PROFILES_KEY],
            json!(["/home/u/.zen/default-release"])
        );
    }

    #[test]
    fn test_write_profile_path_replaces_existing_value() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("package.json");
        fs::write(
            &manifest_path,
            r#"{"browser_profiles": ["/old/path"], "name": "x"}"#,
        )
        .unwrap();

        write_profile_path(&manifest_path, &PathBuf::from("/new/path")).unwrap();

        let value: Value =
            serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
        assert_eq!(value[BROWSER_PROFILES_KEY], json!(["/new/path"]));
    }

    #[test]
    fn test_write_profile_path_rejects_non_object_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("package.json");
        fs::write(&manifest_path, "[1, 2, 3]").unwrap();

        assert!(write_profile_path(&manifest_path, &PathBuf::from("/p")).is_err());
    }

    #[test]
    fn test_write_profile_path_missing_manifest_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("package.json");
        assert!(write_profile_path(&missing, &PathBuf::from("/p")).is_err());
    }
}
