pub mod config;
pub mod discovery;
pub mod error;
pub mod manifest;
pub mod model;
pub mod platform;
pub mod prompt;
pub mod windows;

pub use config::Config;
pub use discovery::{Discovered, Discovery};
pub use error::DiscoveryError;
pub use model::{Browser, ConfigRoot, InstallLocation, OsFamily, PlatformInfo, Profile};
pub use prompt::Prompter;
