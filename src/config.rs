//! Configuration file handling.
//!
//! This module provides loading and saving of sine-create configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/sine-create/config.toml`
//! - macOS: `~/Library/Application Support/sine-create/config.toml`
//! - Windows: `%APPDATA%\sine-create\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! default_browser = "zen"
//! assume_defaults = false
//! command_timeout_secs = 5
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::model::Browser;

/// Application configuration.
///
/// This struct represents all configurable options for sine-create.
/// It can be loaded from a TOML file or created with default values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Browser used when no `--browser` flag is provided.
    ///
    /// Default: "zen"
    pub default_browser: Browser,

    /// Whether to answer every prompt with its default, as if `--yes` were
    /// always passed.
    ///
    /// Default: false
    pub assume_defaults: bool,

    /// Bound, in seconds, on the Windows command-interpreter probe used to
    /// resolve the user profile from inside WSL.
    ///
    /// Default: 5
    pub command_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_browser: Browser::Zen,
            assume_defaults: false,
            command_timeout_secs: 5,
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sine-create")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    ///
    /// This is useful for showing users what the default config looks like.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// The command-interpreter probe bound as a [`Duration`].
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}
