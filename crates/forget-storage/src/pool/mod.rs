//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use forget_core::config::StorageConfig;
use forget_core::errors::ForgetResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    pub fn open(path: &Path, config: &StorageConfig) -> ForgetResult<Self> {
        let writer = WriteConnection::open(path, config)?;
        let readers = ReadPool::open(path, config)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory pool. There is no read pool: separate in-memory
    /// connections would each see their own empty database.
    pub fn open_in_memory(config: &StorageConfig) -> ForgetResult<Self> {
        let writer = WriteConnection::open_in_memory(config)?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }
}
