//! Database schema definitions.
//!
//! Contains the SQL schema for the planner `SQLite` database.

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// SQL schema for initial database setup.
pub const SCHEMA_SQL: &str = r"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_info (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- One row per generated plan (a scheduling run that was saved)
CREATE TABLE IF NOT EXISTS plans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    course_title TEXT NOT NULL,
    strategy TEXT NOT NULL,
    start_at TEXT NOT NULL,
    daily_budget_minutes INTEGER NOT NULL,
    cadence_days INTEGER NOT NULL,
    speed_factor REAL NOT NULL,
    created_at INTEGER NOT NULL
);

-- One row per study session
CREATE TABLE IF NOT EXISTS sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    plan_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    label TEXT NOT NULL,
    category TEXT,
    duration_minutes INTEGER NOT NULL,
    start_at TEXT NOT NULL,
    end_at TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    review INTEGER NOT NULL DEFAULT 0,
    updated_at INTEGER NOT NULL,
    FOREIGN KEY (plan_id) REFERENCES plans(id) ON DELETE CASCADE
);

-- Index for session lookup in plan order
CREATE INDEX IF NOT EXISTS idx_sessions_plan ON sessions(plan_id, position);

-- Index for calendar queries
CREATE INDEX IF NOT EXISTS idx_sessions_start ON sessions(start_at);
";

/// SQL to check if schema is initialized.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name='schema_info';
";

/// SQL to get schema version.
pub const GET_VERSION_SQL: &str = r"
SELECT value FROM schema_info WHERE key = 'version';
";

/// SQL to set schema version.
pub const SET_VERSION_SQL: &str = r"
INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?);
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version() {
        const _: () = assert!(CURRENT_SCHEMA_VERSION >= 1);
    }

    #[test]
    fn test_schema_sql_not_empty() {
        assert!(SCHEMA_SQL.contains("CREATE TABLE IF NOT EXISTS plans"));
        assert!(SCHEMA_SQL.contains("CREATE TABLE IF NOT EXISTS sessions"));
    }

    #[test]
    fn test_schema_sql_executes() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA_SQL).unwrap();
        let count: i64 = conn.query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }
}
