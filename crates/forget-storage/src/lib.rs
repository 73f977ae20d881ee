//! # forget-storage
//!
//! SQLite implementation of [`forget_core::ICounterStore`].
//! One write connection, a round-robin read pool for file-backed databases,
//! and batches that run inside a single immediate transaction.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use forget_core::errors::{ForgetError, StoreError};

/// Map a rusqlite failure to the workspace error.
///
/// `BUSY` and `LOCKED` become [`StoreError::Busy`] so callers see a timeout
/// rather than a generic store failure.
pub(crate) fn to_storage_err(operation: &str, timeout_ms: u32, err: rusqlite::Error) -> ForgetError {
    if let rusqlite::Error::SqliteFailure(ref code, _) = err {
        if matches!(
            code.code,
            rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
        ) {
            return StoreError::Busy {
                operation: operation.to_string(),
                timeout_ms,
            }
            .into();
        }
    }
    StoreError::SqliteError {
        message: format!("{operation}: {err}"),
    }
    .into()
}
