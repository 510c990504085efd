//! End-to-end discovery scenarios against a simulated host filesystem.

use sine_create::discovery::{Discovery, NoopRegistry};
use sine_create::model::{Browser, OsFamily, PlatformInfo};
use sine_create::prompt::ScriptedPrompter;
use std::fs;
use std::path::Path;

const TWO_PROFILE_REGISTRY: &str = "\
[General]
StartWithLastProfile=1
Version=2

[Profile0]
Name=default
Path=default-release
Default=1

[Profile1]
Name=dev
Path=dev-profile
";

fn install_zen(home: &Path, subdir: &str) {
    let root = home.join(subdir);
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("profiles.ini"), TWO_PROFILE_REGISTRY).unwrap();
}

#[tokio::test]
async fn discovers_profile_on_simulated_linux_host() {
    let home = tempfile::tempdir().unwrap();
    install_zen(home.path(), ".zen");

    // Two profiles exist, so selection is invoked; take the default.
    let prompter = ScriptedPrompter::new(vec![0]);
    let registry = NoopRegistry;
    let discovery = Discovery::new(&prompter, &registry).with_home(home.path().to_path_buf());

    let platform = PlatformInfo::new(OsFamily::Linux, false);
    let discovered = discovery
        .run_on(Browser::Zen, platform)
        .await
        .unwrap()
        .expect("discovery should succeed");

    assert_eq!(discovered.config_root.path(), home.path().join(".zen"));
    assert_eq!(discovered.profile.display_name, "default");
    assert!(discovered.profile.is_default);
    assert_eq!(
        discovered.profile.path,
        home.path().join(".zen").join("default-release")
    );
}

#[tokio::test]
async fn prefers_dot_directory_over_config_alternative() {
    let home = tempfile::tempdir().unwrap();
    install_zen(home.path(), ".zen");
    install_zen(home.path(), ".config/zen");

    let prompter = ScriptedPrompter::new(vec![0]);
    let registry = NoopRegistry;
    let discovery = Discovery::new(&prompter, &registry).with_home(home.path().to_path_buf());

    let platform = PlatformInfo::new(OsFamily::Linux, false);
    let discovered = discovery
        .run_on(Browser::Zen, platform)
        .await
        .unwrap()
        .unwrap();

    // First-match semantics: ~/.zen is probed before ~/.config/zen.
    assert_eq!(discovered.config_root.path(), home.path().join(".zen"));
}

#[tokio::test]
async fn falls_back_to_config_directory_when_dot_directory_absent() {
    let home = tempfile::tempdir().unwrap();
    install_zen(home.path(), ".config/zen");

    let prompter = ScriptedPrompter::new(vec![0]);
    let registry = NoopRegistry;
    let discovery = Discovery::new(&prompter, &registry).with_home(home.path().to_path_buf());

    let platform = PlatformInfo::new(OsFamily::Linux, false);
    let discovered = discovery
        .run_on(Browser::Zen, platform)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        discovered.config_root.path(),
        home.path().join(".config").join("zen")
    );
}

#[tokio::test]
async fn missing_installation_reports_clean_failure() {
    let home = tempfile::tempdir().unwrap();

    let prompter = ScriptedPrompter::new(vec![]);
    let registry = NoopRegistry;
    let discovery = Discovery::new(&prompter, &registry).with_home(home.path().to_path_buf());

    let platform = PlatformInfo::new(OsFamily::Linux, false);
    let got = discovery.run_on(Browser::Zen, platform).await.unwrap();
    assert!(got.is_none());
}

#[tokio::test]
async fn single_profile_needs_no_prompt_answers() {
    let home = tempfile::tempdir().unwrap();
    let root = home.path().join(".zen");
    fs::create_dir_all(&root).unwrap();
    fs::write(
        root.join("profiles.ini"),
        "[Profile0]\nName=solo\nPath=solo-dir\nDefault=1\n",
    )
    .unwrap();

    // Empty script: any prompt would fall back to the default answer, but
    // the single-candidate shortcut should not prompt at all.
    let prompter = ScriptedPrompter::new(vec![]);
    let registry = NoopRegistry;
    let discovery = Discovery::new(&prompter, &registry).with_home(home.path().to_path_buf());

    let platform = PlatformInfo::new(OsFamily::Linux, false);
    let discovered = discovery
        .run_on(Browser::Zen, platform)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(discovered.profile.display_name, "solo");
}
