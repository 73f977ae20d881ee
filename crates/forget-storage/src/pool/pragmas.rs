//! PRAGMA configuration applied to every SQLite connection.

use std::time::Duration;

use rusqlite::Connection;

use forget_core::config::StorageConfig;
use forget_core::errors::ForgetResult;

use crate::to_storage_err;

/// Apply write-side pragmas: journal mode, sync level, cache, busy timeout.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> ForgetResult<()> {
    let err = |e: rusqlite::Error| to_storage_err("apply_pragmas", config.busy_timeout_ms, e);
    let journal_mode = if config.wal_mode { "WAL" } else { "DELETE" };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal_mode};
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = {};
        ",
        config.cache_size
    ))
    .map_err(err)?;
    conn.busy_timeout(Duration::from_millis(u64::from(config.busy_timeout_ms)))
        .map_err(err)?;
    Ok(())
}

/// Apply read-side pragmas. Readers never write, so only cache and timeout matter.
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> ForgetResult<()> {
    let err = |e: rusqlite::Error| to_storage_err("apply_read_pragmas", config.busy_timeout_ms, e);
    conn.execute_batch(&format!("PRAGMA cache_size = {};", config.cache_size))
        .map_err(err)?;
    conn.busy_timeout(Duration::from_millis(u64::from(config.busy_timeout_ms)))
        .map_err(err)?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> ForgetResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err("verify_wal_mode", 0, e))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
