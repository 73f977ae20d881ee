//! Single write connection behind a mutex. Serialized writes, no contention.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use forget_core::config::StorageConfig;
use forget_core::errors::{ForgetResult, StoreError};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// A single write connection protected by a mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, config: &StorageConfig) -> ForgetResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| to_storage_err("open", config.busy_timeout_ms, e))?;
        apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database.
    pub fn open_in_memory(config: &StorageConfig) -> ForgetResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| to_storage_err("open_in_memory", config.busy_timeout_ms, e))?;
        apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> ForgetResult<T>
    where
        F: FnOnce(&mut Connection) -> ForgetResult<T>,
    {
        let mut guard = self.conn.lock().map_err(|e| StoreError::LockPoisoned {
            message: format!("write connection: {e}"),
        })?;
        f(&mut guard)
    }
}
