//! # forget-core
//!
//! Foundation crate for the forget table.
//! Defines the models, the backing-store trait, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ForgetConfig;
pub use errors::{ForgetError, ForgetResult, StoreError};
pub use models::{BinScores, CollectionMeta, FetchOptions, TrendScore};
pub use traits::{BatchOutcome, ICounterStore, StoreOp};
