//! Revocation ledger housekeeping configuration.

use serde::{Deserialize, Serialize};

/// Settings for the background purge of expired revocation entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevocationConfig {
    /// Seconds between purge runs. `0` disables the background purge.
    #[serde(default = "default_purge_interval")]
    pub purge_interval_seconds: u64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            purge_interval_seconds: default_purge_interval(),
        }
    }
}

fn default_purge_interval() -> u64 {
    900
}
