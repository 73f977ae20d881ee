//! Top-level configuration with file, environment, and default layers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DecayConfig, ObservabilityConfig, StorageConfig};
use crate::errors::{ForgetError, ForgetResult};

/// Environment variable overriding `storage.db_path`.
pub const ENV_DB_PATH: &str = "FORGET_DB_PATH";
/// Environment variable overriding `decay.scrub_threshold`.
pub const ENV_SCRUB_THRESHOLD: &str = "FORGET_SCRUB_THRESHOLD";
/// Environment variable overriding `observability.log_level`.
pub const ENV_LOG_LEVEL: &str = "FORGET_LOG_LEVEL";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`FORGET_*`)
/// 2. Config file
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ForgetConfig {
    pub storage: StorageConfig,
    pub decay: DecayConfig,
    pub observability: ObservabilityConfig,
}

impl ForgetConfig {
    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> ForgetResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ForgetError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file, then apply environment overrides.
    pub fn from_file(path: &Path) -> ForgetResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ForgetError::ConfigError(format!("{}: {e}", path.display())))?;
        let mut config = Self::from_toml(&raw)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `FORGET_*` environment variables. Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(ENV_DB_PATH) {
            if !path.is_empty() {
                self.storage.db_path = path;
            }
        }
        if let Ok(raw) = std::env::var(ENV_SCRUB_THRESHOLD) {
            if let Ok(threshold) = raw.parse::<f64>() {
                self.decay.scrub_threshold = threshold;
            }
        }
        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            if !level.is_empty() {
                self.observability.log_level = level;
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> ForgetResult<()> {
        let threshold = self.decay.scrub_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ForgetError::ConfigError(format!(
                "decay.scrub_threshold must be finite and >= 0, got {threshold}"
            )));
        }
        if self.decay.max_decay_retries == 0 {
            return Err(ForgetError::ConfigError(
                "decay.max_decay_retries must be at least 1".to_string(),
            ));
        }
        if self.storage.read_pool_size == 0 {
            return Err(ForgetError::ConfigError(
                "storage.read_pool_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
