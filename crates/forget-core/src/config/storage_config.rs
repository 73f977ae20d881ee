use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Where counters and collection metadata are persisted, and how the SQLite
/// connections behind them are tuned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file holding every collection.
    pub db_path: String,
    /// WAL lets readers fetch while a decay batch is committing.
    pub wal_mode: bool,
    /// SQLite `cache_size` pragma; negative values are KiB.
    pub cache_size: i64,
    /// How long a writer waits on a locked database before `Timeout`.
    pub busy_timeout_ms: u32,
    /// Read-only connections for fetches. Ignored for in-memory stores.
    pub read_pool_size: usize,
}

impl StorageConfig {
    pub fn db_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.db_path)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            wal_mode: defaults::DEFAULT_WAL_MODE,
            cache_size: defaults::DEFAULT_CACHE_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
