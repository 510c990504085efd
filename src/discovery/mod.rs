//! Browser profile discovery.
//!
//! Ties the platform detector, Windows user-profile resolver, candidate
//! prober, registry parser, and selector into one flow:
//!
//! detect platform → (WSL only) pick install location → resolve the Windows
//! user profile if relevant → probe candidates for a verified configuration
//! root → parse `profiles.ini` → select a profile.
//!
//! Every step degrades to "not found" instead of failing; the only hard
//! errors are the contract violations listed on
//! [`DiscoveryError`](crate::error::DiscoveryError).

mod paths;
mod profiles;
mod registry;

pub use paths::{candidate_paths, find_config_root, is_valid_installation, probe_candidates};
pub use profiles::{load_profiles, order_for_display, parse_profiles, select_profile};
pub use registry::{platform_registry, NoopRegistry, RegistryReader};

use crate::error::DiscoveryError;
use crate::model::{Browser, ConfigRoot, InstallLocation, PlatformInfo, Profile};
use crate::platform::detect_platform;
use crate::prompt::Prompter;
use crate::windows::{resolve_windows_user_profile, DEFAULT_COMMAND_TIMEOUT};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Resolves a user-supplied browser name against the supported set.
///
/// Unknown names and recognized-but-unsupported browsers both fall back to
/// the default with a visible message; bad input here must never crash the
/// scaffolding flow.
pub fn resolve_browser(name: Option<&str>, default: Browser) -> Browser {
    let Some(name) = name else {
        return default;
    };

    let browser = match name.to_lowercase().as_str() {
        "zen" => Some(Browser::Zen),
        "firefox" => Some(Browser::Firefox),
        _ => None,
    };

    match browser {
        Some(browser) if browser.is_supported() => browser,
        Some(browser) => {
            warn!(
                "{} is not supported yet, falling back to {}",
                browser, default
            );
            default
        }
        None => {
            warn!("unknown browser {:?}, falling back to {}", name, default);
            default
        }
    }
}

/// Result of a successful discovery run.
#[derive(Debug, Clone)]
pub struct Discovered {
    /// Verified configuration root the profile came from.
    pub config_root: ConfigRoot,
    /// The chosen profile.
    pub profile: Profile,
}

/// One discovery run with its injected capabilities.
///
/// Nothing is cached between runs; each [`Discovery::run`] is a fresh call
/// chain with only locally threaded values.
pub struct Discovery<'a> {
    prompter: &'a dyn Prompter,
    registry: &'a dyn RegistryReader,
    command_timeout: Duration,
    home: Option<PathBuf>,
}

impl<'a> Discovery<'a> {
    pub fn new(prompter: &'a dyn Prompter, registry: &'a dyn RegistryReader) -> Self {
        Self {
            prompter,
            registry,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            home: None,
        }
    }

    /// Bounds the WSL `cmd.exe` probe.
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Overrides the home directory used for Linux/macOS candidates.
    /// Defaults to the real home directory; tests point this at a tempdir.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = Some(home);
        self
    }

    /// Runs the full flow against the detected host platform.
    pub async fn run(&self, browser: Browser) -> Result<Option<Discovered>, DiscoveryError> {
        let platform = self.resolve_platform(None).await?;
        self.run_on(browser, platform).await
    }

    /// Runs the full flow against an already-resolved platform.
    pub async fn run_on(
        &self,
        browser: Browser,
        platform: PlatformInfo,
    ) -> Result<Option<Discovered>, DiscoveryError> {
        let platform = self.complete_platform(platform).await?;

        let Some(root) = self.find_installation(browser, &platform).await? else {
            info!("{} installation not found", browser);
            return Ok(None);
        };
        info!(path = %root.path().display(), "found browser installation");

        self.pick_profile(&root).await
    }

    /// Detects the host platform. Under WSL, `install_location` pins the
    /// install side directly; when it is `None` and both sides are
    /// plausible, the prompt layer asks.
    pub async fn resolve_platform(
        &self,
        install_location: Option<InstallLocation>,
    ) -> Result<PlatformInfo, DiscoveryError> {
        let mut platform = detect_platform().await;
        if platform.is_wsl {
            platform.install_location = install_location;
        }
        self.complete_platform(platform).await
    }

    async fn complete_platform(
        &self,
        mut platform: PlatformInfo,
    ) -> Result<PlatformInfo, DiscoveryError> {
        if platform.is_wsl && platform.install_location.is_none() {
            platform.install_location = Some(self.choose_install_location().await?);
        }
        Ok(platform)
    }

    /// Probes for a verified configuration root. Never prompts, so callers
    /// may wrap this stage in a progress indicator.
    pub async fn find_installation(
        &self,
        browser: Browser,
        platform: &PlatformInfo,
    ) -> Result<Option<ConfigRoot>, DiscoveryError> {
        let windows_user_profile = if platform.uses_windows_paths() {
            resolve_windows_user_profile(platform.is_wsl, self.command_timeout).await
        } else {
            None
        };

        let home = self.home.clone().or_else(dirs::home_dir);
        find_config_root(
            browser,
            platform,
            home.as_deref(),
            windows_user_profile.as_deref(),
            self.registry,
        )
    }

    /// Parses the profile registry under `root` and arbitrates among the
    /// entries, prompting when more than one exists.
    pub async fn pick_profile(
        &self,
        root: &ConfigRoot,
    ) -> Result<Option<Discovered>, DiscoveryError> {
        let profiles = load_profiles(root)?;
        let profile = select_profile(&profiles, self.prompter).await?;

        Ok(profile.map(|profile| Discovered {
            config_root: root.clone(),
            profile,
        }))
    }

    /// Asks which side of the WSL boundary the browser is installed on.
    /// Windows is the default, matching where a GUI browser usually lives.
    async fn choose_install_location(&self) -> Result<InstallLocation, DiscoveryError> {
        let locations = [InstallLocation::Windows, InstallLocation::Linux];
        let options: Vec<String> = locations
            .iter()
            .map(|l| l.description().to_string())
            .collect();
        let index = self
            .prompter
            .select("Where is your browser installed?", &options, 0)
            .await?;
        Ok(locations[index.min(locations.len() - 1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OsFamily, PROFILES_INI};
    use crate::prompt::ScriptedPrompter;
    use std::fs;

    #[test]
    fn test_resolve_browser_fallbacks() {
        assert_eq!(resolve_browser(None, Browser::Zen), Browser::Zen);
        assert_eq!(resolve_browser(Some("zen"), Browser::Zen), Browser::Zen);
        assert_eq!(resolve_browser(Some("ZEN"), Browser::Zen), Browser::Zen);
        // Recognized but unsupported falls back instead of crashing.
        assert_eq!(resolve_browser(Some("firefox"), Browser::Zen), Browser::Zen);
        assert_eq!(resolve_browser(Some("netscape"), Browser::Zen), Browser::Zen);
    }

    #[tokio::test]
    async fn test_run_on_simulated_linux_host() {
        let home_dir = tempfile::tempdir().unwrap();
        let root = home_dir.path().join(".zen");
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join(PROFILES_INI),
            "[Profile0]\nName=default\nPath=default-release\nDefault=1\n\n\
             [Profile1]\nName=dev\nPath=dev-profile\n",
        )
        .unwrap();

        // Two profiles exist, so a selection step runs; pick the second.
        let prompter = ScriptedPrompter::new(vec![1]);
        let registry = NoopRegistry;
        let discovery =
            Discovery::new(&prompter, &registry).with_home(home_dir.path().to_path_buf());

        let platform = PlatformInfo::new(OsFamily::Linux, false);
        let discovered = discovery
            .run_on(Browser::Zen, platform)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(discovered.config_root.path(), root);
        assert_eq!(discovered.profile.display_name, "dev");
        assert_eq!(discovered.profile.path, root.join("dev-profile"));
    }

    #[tokio::test]
    async fn test_run_on_missing_installation_is_clean_none() {
        let home_dir = tempfile::tempdir().unwrap();
        let prompter = ScriptedPrompter::new(vec![]);
        let registry = NoopRegistry;
        let discovery =
            Discovery::new(&prompter, &registry).with_home(home_dir.path().to_path_buf());

        let platform = PlatformInfo::new(OsFamily::Linux, false);
        let got = discovery.run_on(Browser::Zen, platform).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_run_on_unsupported_browser_errors() {
        let prompter = ScriptedPrompter::new(vec![]);
        let registry = NoopRegistry;
        let discovery = Discovery::new(&prompter, &registry);

        let platform = PlatformInfo::new(OsFamily::Linux, false);
        let err = discovery
            .run_on(Browser::Firefox, platform)
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::UnsupportedBrowser(_)));
    }
}
