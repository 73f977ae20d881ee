/// Backing-store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("store busy during {operation} after {timeout_ms}ms")]
    Busy { operation: String, timeout_ms: u32 },

    #[error("store lock poisoned: {message}")]
    LockPoisoned { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },
}
