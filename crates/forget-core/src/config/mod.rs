//! Configuration: one struct per subsystem, aggregated by [`ForgetConfig`].

pub mod decay_config;
pub mod defaults;
pub mod forget_config;
pub mod observability_config;
pub mod storage_config;

pub use decay_config::DecayConfig;
pub use forget_config::ForgetConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;
