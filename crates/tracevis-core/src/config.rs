//! Player configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for a [`Player`](crate::Player).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Keep every snapshot whose step is a multiple of this. `1` caches every
    /// step; `0` is treated as `1`.
    pub checkpoint_interval: usize,
    /// Attach non-fatal conditions to the snapshots that raised them
    pub record_conditions: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            checkpoint_interval: 64,
            record_conditions: true,
        }
    }
}

impl PlayerConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Cache every snapshot. Backward steps become lookups.
    pub fn cache_all() -> Self {
        Self {
            checkpoint_interval: 1,
            ..Self::default()
        }
    }

    pub(crate) fn effective_interval(&self) -> usize {
        self.checkpoint_interval.max(1)
    }
}
