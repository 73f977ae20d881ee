use rusqlite::{params, Connection, OptionalExtension};

pub fn increment(conn: &Connection, set: &str, member: &str, amount: f64) -> rusqlite::Result<f64> {
    conn.query_row(
        "INSERT INTO sorted_set_members (set_name, member, score) VALUES (?1, ?2, ?3)
         ON CONFLICT(set_name, member) DO UPDATE SET score = score + excluded.score
         RETURNING score",
        params![set, member, amount],
        |row| row.get(0),
    )
}

pub fn score(conn: &Connection, set: &str, member: &str) -> rusqlite::Result<Option<f64>> {
    conn.query_row(
        "SELECT score FROM sorted_set_members WHERE set_name = ?1 AND member = ?2",
        params![set, member],
        |row| row.get(0),
    )
    .optional()
}

/// Members by descending score. SQLite treats a negative LIMIT as unbounded.
pub fn range_by_score_desc(
    conn: &Connection,
    set: &str,
    limit: Option<usize>,
) -> rusqlite::Result<Vec<(String, f64)>> {
    let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
    let mut stmt = conn.prepare_cached(
        "SELECT member, score FROM sorted_set_members
         WHERE set_name = ?1
         ORDER BY score DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![set, limit], |row| Ok((row.get(0)?, row.get(1)?)))?;
    rows.collect()
}

pub fn scale_scores(conn: &Connection, set: &str, factor: f64) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE sorted_set_members SET score = score * ?2 WHERE set_name = ?1",
        params![set, factor],
    )
}

pub fn remove_range_by_score(
    conn: &Connection,
    set: &str,
    min: f64,
    max: f64,
) -> rusqlite::Result<usize> {
    conn.execute(
        "DELETE FROM sorted_set_members
         WHERE set_name = ?1 AND score >= ?2 AND score <= ?3",
        params![set, min, max],
    )
}

pub fn cardinality(conn: &Connection, set: &str) -> rusqlite::Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sorted_set_members WHERE set_name = ?1",
        params![set],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}
