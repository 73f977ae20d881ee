//! WAL checkpoint and integrity check.

use rusqlite::Connection;

/// WAL checkpoint.
pub fn wal_checkpoint(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")
}

/// Run integrity check. Returns true if the database is OK.
pub fn integrity_check(conn: &Connection) -> rusqlite::Result<bool> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    Ok(result == "ok")
}
