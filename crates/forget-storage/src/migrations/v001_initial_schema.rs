//! v001: plain key/value metadata and sorted-set members.

pub const MIGRATION_SQL: &str = "
    CREATE TABLE IF NOT EXISTS kv (
        key    TEXT PRIMARY KEY,
        value  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS sorted_set_members (
        set_name  TEXT NOT NULL,
        member    TEXT NOT NULL,
        score     REAL NOT NULL,
        PRIMARY KEY (set_name, member)
    ) WITHOUT ROWID;

    CREATE INDEX IF NOT EXISTS idx_sorted_set_score
        ON sorted_set_members(set_name, score);
";
