//! Remote runtime version: a parsed major version, or unknown.
//!
//! Unknown is never fatal. The version only gates the interpreter-refresh
//! optimization, never correctness.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Lowest major version whose interpreter supports (and needs) an in-place
/// restart to make freshly installed libraries importable.
pub const REFRESH_MIN_MAJOR: u32 = 13;

/// Major version of the remote runtime, as reported by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuntimeVersion {
    Known(u32),
    Unknown,
}

impl RuntimeVersion {
    /// Parse the raw probe output.
    ///
    /// The leading dot-delimited component is read as the major version
    /// ("14.3.x-extras" -> 14). Empty output, the textual `None` sentinel,
    /// and anything unparseable all collapse to `Unknown`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "None" {
            return RuntimeVersion::Unknown;
        }

        match trimmed.split('.').next().unwrap_or(trimmed).parse::<u32>() {
            Ok(major) => RuntimeVersion::Known(major),
            Err(_) => {
                warn!(raw = trimmed, "cannot identify the runtime version, package may not be updated");
                RuntimeVersion::Unknown
            }
        }
    }

    /// Does this runtime want an interpreter restart after installs?
    pub fn supports_refresh(&self) -> bool {
        matches!(self, RuntimeVersion::Known(major) if *major >= REFRESH_MIN_MAJOR)
    }
}
