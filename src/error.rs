//! Error types for the discovery library.

use crate::model::Browser;
use thiserror::Error;

/// Errors surfaced by profile discovery.
///
/// Most failure modes in discovery are deliberately *not* errors: a missing
/// installation, an empty profile list, or an unavailable probe all degrade
/// to `None` at the call site. The variants here are the conditions that must
/// not be swallowed.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The caller handed the prober a browser it was never taught to probe.
    /// Callers are expected to validate the id against the supported set
    /// first, so this is a contract violation rather than user error.
    #[error("unsupported browser: {0}")]
    UnsupportedBrowser(Browser),

    /// The profile registry existed during probing but could not be read.
    #[error("failed to read profile registry at {path}")]
    RegistryRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The prompt layer failed (closed stdin, I/O error on the terminal).
    #[error("prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}
