//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Change requests touching more files than this are flagged as large.
pub const BIG_CHANGE_THRESHOLD: u64 = 10;

/// Commit titles longer than this many characters are flagged.
pub const LONG_TITLE_THRESHOLD: usize = 50;

/// Package manifest watched by the lockfile check.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Lock file expected to change alongside [`PACKAGE_MANIFEST`].
pub const PACKAGE_LOCKFILE: &str = "package-lock.json";

/// Tunables of a [`RuleEngine`](crate::engine::RuleEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub big_change_threshold: u64,
    pub long_title_threshold: usize,
    pub package_manifest: String,
    pub package_lockfile: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            big_change_threshold: BIG_CHANGE_THRESHOLD,
            long_title_threshold: LONG_TITLE_THRESHOLD,
            package_manifest: PACKAGE_MANIFEST.to_string(),
            package_lockfile: PACKAGE_LOCKFILE.to_string(),
        }
    }
}
