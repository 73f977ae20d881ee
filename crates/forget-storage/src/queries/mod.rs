//! Thin SQL wrappers. Each takes a borrowed connection (or transaction)
//! and returns raw rusqlite results; the engine maps errors.

pub mod batch_ops;
pub mod kv_ops;
pub mod maintenance;
pub mod sorted_set_ops;
