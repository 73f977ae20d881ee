//! # forget-observability
//!
//! Tracing subscriber setup and the structured events emitted by the decay engine.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing};
