use serde::{Deserialize, Serialize};

use super::defaults;

/// Decay subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Scores at or below this value are removed by scrub.
    pub scrub_threshold: f64,
    /// Optimistic decay attempts before giving up with a conflict.
    pub max_decay_retries: u32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            scrub_threshold: defaults::DEFAULT_SCRUB_THRESHOLD,
            max_decay_retries: defaults::DEFAULT_MAX_DECAY_RETRIES,
        }
    }
}
