//! StorageEngine: owns the ConnectionPool, implements ICounterStore,
//! runs migrations at startup.

use std::path::Path;

use rusqlite::Connection;

use forget_core::config::StorageConfig;
use forget_core::errors::{ForgetError, ForgetResult};
use forget_core::traits::{BatchOutcome, ICounterStore, StoreOp};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{batch_ops, kv_ops, maintenance, sorted_set_ops};
use crate::to_storage_err;

/// The SQLite backing store.
pub struct StorageEngine {
    pool: ConnectionPool,
    busy_timeout_ms: u32,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk, with default settings.
    pub fn open(path: &Path) -> ForgetResult<Self> {
        let config = StorageConfig {
            db_path: path.display().to_string(),
            ..StorageConfig::default()
        };
        Self::open_with_config(&config)
    }

    /// Open the database named by `config.db_path`.
    pub fn open_with_config(config: &StorageConfig) -> ForgetResult<Self> {
        let pool = ConnectionPool::open(&config.db_path_buf(), config)?;
        let engine = Self {
            pool,
            busy_timeout_ms: config.busy_timeout_ms,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine. All reads go through the writer.
    pub fn open_in_memory() -> ForgetResult<Self> {
        let config = StorageConfig::default();
        let pool = ConnectionPool::open_in_memory(&config)?;
        let engine = Self {
            pool,
            busy_timeout_ms: config.busy_timeout_ms,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> ForgetResult<()> {
        self.pool.writer.with_conn(|conn| migrations::run_migrations(conn))
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn sql_err(&self, operation: &'static str) -> impl Fn(rusqlite::Error) -> ForgetError {
        let timeout_ms = self.busy_timeout_ms;
        move |e| to_storage_err(operation, timeout_ms, e)
    }

    /// Run a read on the read pool when there is one, else on the writer.
    fn with_reader<F, T>(&self, f: F) -> ForgetResult<T>
    where
        F: FnOnce(&Connection) -> ForgetResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(|conn| f(conn)),
        }
    }

    /// Number of members in a sorted set.
    pub fn cardinality(&self, set: &str) -> ForgetResult<usize> {
        let err = self.sql_err("cardinality");
        self.with_reader(|conn| sorted_set_ops::cardinality(conn, set).map_err(err))
    }

    /// Current schema version.
    pub fn schema_version(&self) -> ForgetResult<u32> {
        self.pool.writer.with_conn(|conn| migrations::current_version(conn))
    }

    /// Truncating WAL checkpoint.
    pub fn wal_checkpoint(&self) -> ForgetResult<()> {
        let err = self.sql_err("wal_checkpoint");
        self.pool
            .writer
            .with_conn(|conn| maintenance::wal_checkpoint(conn).map_err(err))
    }

    /// Returns true when SQLite reports the database as intact.
    pub fn integrity_check(&self) -> ForgetResult<bool> {
        let err = self.sql_err("integrity_check");
        self.pool
            .writer
            .with_conn(|conn| maintenance::integrity_check(conn).map_err(err))
    }
}

impl ICounterStore for StorageEngine {
    fn get(&self, key: &str) -> ForgetResult<Option<String>> {
        let err = self.sql_err("get");
        self.with_reader(|conn| kv_ops::get(conn, key).map_err(err))
    }

    fn set(&self, key: &str, value: &str) -> ForgetResult<()> {
        let err = self.sql_err("set");
        self.pool
            .writer
            .with_conn(|conn| kv_ops::set(conn, key, value).map_err(err))
    }

    fn increment(&self, set: &str, member: &str, amount: f64) -> ForgetResult<f64> {
        let err = self.sql_err("increment");
        self.pool
            .writer
            .with_conn(|conn| sorted_set_ops::increment(conn, set, member, amount).map_err(err))
    }

    fn score(&self, set: &str, member: &str) -> ForgetResult<Option<f64>> {
        let err = self.sql_err("score");
        self.with_reader(|conn| sorted_set_ops::score(conn, set, member).map_err(err))
    }

    fn range_by_score_desc(
        &self,
        set: &str,
        limit: Option<usize>,
    ) -> ForgetResult<Vec<(String, f64)>> {
        let err = self.sql_err("range_by_score_desc");
        self.with_reader(|conn| sorted_set_ops::range_by_score_desc(conn, set, limit).map_err(err))
    }

    fn remove_range_by_score(&self, set: &str, min: f64, max: f64) -> ForgetResult<usize> {
        let err = self.sql_err("remove_range_by_score");
        self.pool.writer.with_conn(|conn| {
            sorted_set_ops::remove_range_by_score(conn, set, min, max).map_err(err)
        })
    }

    fn batch(&self, ops: &[StoreOp]) -> ForgetResult<BatchOutcome> {
        let err = self.sql_err("batch");
        let outcome = self
            .pool
            .writer
            .with_conn(|conn| batch_ops::apply(conn, ops).map_err(err))?;
        if let BatchOutcome::Conflict { ref key } = outcome {
            tracing::debug!(key = %key, ops = ops.len(), "batch guard failed, rolled back");
        }
        Ok(outcome)
    }
}
