//! Schema migrations using PRAGMA user_version.

pub mod v001_initial_schema;

use rusqlite::Connection;

use forget_core::errors::{ForgetResult, StoreError};

/// Run all pending migrations. A database written by a newer schema is
/// refused rather than opened.
pub fn run_migrations(conn: &Connection) -> ForgetResult<()> {
    let current = current_version(conn)?;
    if current > LATEST_VERSION {
        return Err(StoreError::MigrationFailed {
            version: current,
            message: format!("database schema is newer than supported version {LATEST_VERSION}"),
        }
        .into());
    }

    let migrations: &[(&str, u32)] = &[(v001_initial_schema::MIGRATION_SQL, 1)];

    for (sql, version) in migrations {
        if current < *version {
            conn.execute_batch(sql)
                .map_err(|e| StoreError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StoreError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> ForgetResult<u32> {
    let version = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StoreError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(version)
}

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 1;
