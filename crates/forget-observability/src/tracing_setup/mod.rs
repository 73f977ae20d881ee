//! Tracing setup: structured logging and event helpers.

pub mod events;

use forget_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "FORGET_LOG";

/// Install the global tracing subscriber.
///
/// `FORGET_LOG` wins over `config.log_level`. Returns false when a global
/// subscriber was already installed, which leaves the existing one in place.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_output {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
