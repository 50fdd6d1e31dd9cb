//! `SQLite` storage implementation.
//!
//! Persists saved plans and their sessions, one row per session.

// SQLite stores all integers as i64. These casts are intentional and safe
// because we only store non-negative values that fit in usize/u32.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::core::{Category, SessionStatus, StoredSession, StudySession};
use crate::error::{Result, StorageError};
use crate::scheduling::PlanConfig;
use crate::storage::schema::{
    CHECK_SCHEMA_SQL, CURRENT_SCHEMA_VERSION, GET_VERSION_SQL, SCHEMA_SQL, SET_VERSION_SQL,
};
use crate::storage::traits::{PlanRecord, Storage, StorageStats};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};

/// Plan columns plus per-plan session aggregates.
const PLAN_SELECT: &str = r"
SELECT p.id, p.course_title, p.strategy, p.start_at, p.daily_budget_minutes,
       p.cadence_days, p.speed_factor, p.created_at,
       (SELECT COUNT(*) FROM sessions s WHERE s.plan_id = p.id) AS session_count,
       (SELECT COALESCE(SUM(s.duration_minutes), 0) FROM sessions s WHERE s.plan_id = p.id)
           AS total_minutes
FROM plans p
";

const SESSION_SELECT: &str = r"
SELECT id, plan_id, position, label, category, duration_minutes,
       start_at, end_at, status, review
FROM sessions
";

/// SQLite-based storage implementation.
///
/// # Examples
///
/// ```no_run
/// use course_planner::storage::{SqliteStorage, Storage};
///
/// let mut storage = SqliteStorage::open("planner.db").unwrap();
/// storage.init().unwrap();
/// ```
pub struct SqliteStorage {
    /// `SQLite` connection.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Database(e.to_string()))?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;

        conn.execute("PRAGMA foreign_keys = ON;", [])
            .map_err(StorageError::from)?;

        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        conn.execute("PRAGMA foreign_keys = ON;", [])
            .map_err(StorageError::from)?;

        Ok(Self { conn, path: None })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn get_schema_version(&self) -> Result<Option<u32>> {
        let version: Option<String> = self
            .conn
            .query_row(GET_VERSION_SQL, [], |row| row.get(0))
            .optional()
            .map_err(StorageError::from)?;

        Ok(version.and_then(|v| v.parse().ok()))
    }

    fn set_schema_version(&self, version: u32) -> Result<()> {
        self.conn
            .execute(SET_VERSION_SQL, params![version.to_string()])
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Returns current Unix timestamp.
    #[allow(clippy::cast_possible_wrap)]
    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }

    fn count(&self, sql: &str) -> Result<i64> {
        Ok(self
            .conn
            .query_row(sql, [], |row| row.get(0))
            .map_err(StorageError::from)?)
    }
}

/// Decodes a text column through `parse`, failing the row on unknown values.
fn parse_column<T>(
    index: usize,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    parse(value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            Box::new(StorageError::Serialization(format!(
                "unexpected value '{value}'"
            ))),
        )
    })
}

fn row_to_plan(row: &Row<'_>) -> rusqlite::Result<PlanRecord> {
    let session_count: i64 = row.get("session_count")?;
    let total_minutes: i64 = row.get("total_minutes")?;

    Ok(PlanRecord {
        id: Some(row.get("id")?),
        course_title: row.get("course_title")?,
        strategy: row.get("strategy")?,
        config: PlanConfig {
            start: row.get("start_at")?,
            daily_budget_minutes: row.get("daily_budget_minutes")?,
            cadence_days: row.get("cadence_days")?,
            speed_factor: row.get("speed_factor")?,
        },
        created_at: row.get("created_at")?,
        session_count: session_count as usize,
        total_minutes: total_minutes as u64,
    })
}

fn row_to_session(row: &Row<'_>) -> rusqlite::Result<StoredSession> {
    let position: i64 = row.get("position")?;
    let category: Option<String> = row.get("category")?;
    let status: String = row.get("status")?;

    Ok(StoredSession {
        id: row.get("id")?,
        plan_id: row.get("plan_id")?,
        position: position as usize,
        session: StudySession {
            label: row.get("label")?,
            category: category
                .as_deref()
                .map(|c| parse_column(4, c, Category::parse))
                .transpose()?,
            duration_minutes: row.get("duration_minutes")?,
            start: row.get("start_at")?,
            end: row.get("end_at")?,
        },
        status: parse_column(8, &status, SessionStatus::parse)?,
        review: row.get("review")?,
    })
}

impl Storage for SqliteStorage {
    fn init(&mut self) -> Result<()> {
        let is_init: i64 = self.count(CHECK_SCHEMA_SQL)?;

        if is_init == 0 {
            self.conn
                .execute_batch(SCHEMA_SQL)
                .map_err(StorageError::from)?;
            self.set_schema_version(CURRENT_SCHEMA_VERSION)?;
        } else if let Some(current) = self.get_schema_version()?
            && current > CURRENT_SCHEMA_VERSION
        {
            return Err(StorageError::Migration(format!(
                "database schema v{current} is newer than supported v{CURRENT_SCHEMA_VERSION}"
            ))
            .into());
        }

        Ok(())
    }

    fn is_initialized(&self) -> Result<bool> {
        Ok(self.count(CHECK_SCHEMA_SQL)? > 0)
    }

    fn reset(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            DELETE FROM sessions;
            DELETE FROM plans;
        ",
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    // ==================== Plan Operations ====================

    fn create_plan(&mut self, plan: &PlanRecord) -> Result<i64> {
        self.conn
            .execute(
                r"
            INSERT INTO plans (
                course_title, strategy, start_at, daily_budget_minutes,
                cadence_days, speed_factor, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        ",
                params![
                    plan.course_title,
                    plan.strategy,
                    plan.config.start,
                    plan.config.daily_budget_minutes,
                    plan.config.cadence_days,
                    plan.config.speed_factor,
                    Self::now(),
                ],
            )
            .map_err(StorageError::from)?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_plan(&self, id: i64) -> Result<Option<PlanRecord>> {
        let sql = format!("{PLAN_SELECT} WHERE p.id = ?");
        let plan = self
            .conn
            .query_row(&sql, params![id], row_to_plan)
            .optional()
            .map_err(StorageError::from)?;
        Ok(plan)
    }

    fn list_plans(&self) -> Result<Vec<PlanRecord>> {
        let sql = format!("{PLAN_SELECT} ORDER BY p.id DESC");
        let mut stmt = self.conn.prepare(&sql).map_err(StorageError::from)?;
        let plans = stmt
            .query_map([], row_to_plan)
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;
        Ok(plans)
    }

    fn delete_plan(&mut self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM plans WHERE id = ?", params![id])
            .map_err(StorageError::from)?;
        if affected == 0 {
            return Err(StorageError::PlanNotFound { id }.into());
        }
        Ok(())
    }

    // ==================== Session Operations ====================

    #[allow(clippy::cast_possible_wrap)]
    fn add_session(
        &mut self,
        plan_id: i64,
        position: usize,
        session: &StudySession,
    ) -> Result<i64> {
        self.conn
            .execute(
                r"
            INSERT INTO sessions (
                plan_id, position, label, category, duration_minutes,
                start_at, end_at, status, review, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?)
        ",
                params![
                    plan_id,
                    position as i64,
                    session.label,
                    session.category.map(Category::as_str),
                    session.duration_minutes,
                    session.start,
                    session.end,
                    SessionStatus::Pending.as_str(),
                    Self::now(),
                ],
            )
            .map_err(StorageError::from)?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_session(&self, id: i64) -> Result<Option<StoredSession>> {
        let sql = format!("{SESSION_SELECT} WHERE id = ?");
        let session = self
            .conn
            .query_row(&sql, params![id], row_to_session)
            .optional()
            .map_err(StorageError::from)?;
        Ok(session)
    }

    fn get_sessions(&self, plan_id: i64) -> Result<Vec<StoredSession>> {
        let sql = format!("{SESSION_SELECT} WHERE plan_id = ? ORDER BY position");
        let mut stmt = self.conn.prepare(&sql).map_err(StorageError::from)?;
        let sessions = stmt
            .query_map(params![plan_id], row_to_session)
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;
        Ok(sessions)
    }

    fn set_session_status(&mut self, id: i64, status: SessionStatus) -> Result<()> {
        let affected = self
            .conn
            .execute(
                "UPDATE sessions SET status = ?, updated_at = ? WHERE id = ?",
                params![status.as_str(), Self::now(), id],
            )
            .map_err(StorageError::from)?;
        if affected == 0 {
            return Err(StorageError::SessionNotFound { id }.into());
        }
        Ok(())
    }

    fn set_session_review(&mut self, id: i64, review: bool) -> Result<()> {
        let affected = self
            .conn
            .execute(
                "UPDATE sessions SET review = ?, updated_at = ? WHERE id = ?",
                params![review, Self::now(), id],
            )
            .map_err(StorageError::from)?;
        if affected == 0 {
            return Err(StorageError::SessionNotFound { id }.into());
        }
        Ok(())
    }

    // ==================== Utility Operations ====================

    fn stats(&self) -> Result<StorageStats> {
        let plan_count = self.count("SELECT COUNT(*) FROM plans")?;
        let session_count = self.count("SELECT COUNT(*) FROM sessions")?;
        let reviewed_count = self.count("SELECT COUNT(*) FROM sessions WHERE status != 'pending'")?;
        let total_minutes = self.count("SELECT COALESCE(SUM(duration_minutes), 0) FROM sessions")?;
        let schema_version = self.get_schema_version()?.unwrap_or(0);

        let db_size = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok().map(|m| m.len()));

        Ok(StorageStats {
            plan_count: plan_count as usize,
            session_count: session_count as usize,
            reviewed_count: reviewed_count as usize,
            total_minutes: total_minutes as u64,
            schema_version,
            db_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::parse_start;

    fn setup() -> SqliteStorage {
        let mut storage = SqliteStorage::in_memory().unwrap();
        storage.init().unwrap();
        storage
    }

    fn config() -> PlanConfig {
        PlanConfig::new(parse_start("2024-01-01T09:00").unwrap(), 20, 1, 1.25).unwrap()
    }

    fn session(label: &str, category: Option<Category>, at: &str, minutes: u32) -> StudySession {
        StudySession::starting_at(label, category, parse_start(at).unwrap(), minutes).unwrap()
    }

    #[test]
    fn test_init() {
        let mut storage = SqliteStorage::in_memory().unwrap();
        assert!(!storage.is_initialized().unwrap());
        assert!(storage.init().is_ok());
        assert!(storage.is_initialized().unwrap());
    }

    #[test]
    fn test_init_idempotent() {
        let mut storage = SqliteStorage::in_memory().unwrap();
        assert!(storage.init().is_ok());
        assert!(storage.init().is_ok());
    }

    #[test]
    fn test_init_rejects_newer_schema() {
        let mut storage = setup();
        storage.set_schema_version(CURRENT_SCHEMA_VERSION + 1).unwrap();
        assert!(storage.init().is_err());
    }

    #[test]
    fn test_plan_round_trip() {
        let mut storage = setup();
        let id = storage
            .create_plan(&PlanRecord::new("Rust", "lecture", config()))
            .unwrap();

        let plan = storage.get_plan(id).unwrap().unwrap();
        assert_eq!(plan.id, Some(id));
        assert_eq!(plan.course_title, "Rust");
        assert_eq!(plan.strategy, "lecture");
        assert_eq!(plan.config, config());
        assert_eq!(plan.session_count, 0);
        assert!(plan.created_at > 0);

        assert!(storage.get_plan(id + 100).unwrap().is_none());
    }

    #[test]
    fn test_sessions_round_trip_in_order() {
        let mut storage = setup();
        let plan_id = storage
            .create_plan(&PlanRecord::new("Rust", "lecture", config()))
            .unwrap();

        let first = session("L1", Some(Category::Lecture), "2024-01-01T09:00", 11);
        let second = session("Basics p.1", None, "2024-01-02T09:00", 18);
        storage.add_session(plan_id, 1, &second).unwrap();
        storage.add_session(plan_id, 0, &first).unwrap();

        let stored = storage.get_sessions(plan_id).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].session, first);
        assert_eq!(stored[1].session, second);
        assert_eq!(stored[1].session.category, None);
        assert_eq!(stored[0].status, SessionStatus::Pending);
        assert!(!stored[0].review);

        let plan = storage.get_plan(plan_id).unwrap().unwrap();
        assert_eq!(plan.session_count, 2);
        assert_eq!(plan.total_minutes, 29);
    }

    #[test]
    fn test_status_and_review_updates() {
        let mut storage = setup();
        let plan_id = storage
            .create_plan(&PlanRecord::new("Rust", "lecture", config()))
            .unwrap();
        let id = storage
            .add_session(plan_id, 0, &session("Quiz 1", Some(Category::Quiz), "2024-01-01T09:00", 5))
            .unwrap();

        storage.set_session_status(id, SessionStatus::NeedMoreInfo).unwrap();
        storage.set_session_review(id, true).unwrap();

        let stored = storage.get_session(id).unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::NeedMoreInfo);
        assert!(stored.review);
        assert_eq!(stored.session.category, Some(Category::Quiz));

        assert!(storage.set_session_status(id + 1, SessionStatus::Ok).is_err());
        assert!(storage.set_session_review(id + 1, true).is_err());
    }

    #[test]
    fn test_delete_plan_cascades() {
        let mut storage = setup();
        let plan_id = storage
            .create_plan(&PlanRecord::new("Rust", "section", config()))
            .unwrap();
        let session_id = storage
            .add_session(plan_id, 0, &session("S p.1", None, "2024-01-01T09:00", 20))
            .unwrap();

        storage.delete_plan(plan_id).unwrap();
        assert!(storage.get_plan(plan_id).unwrap().is_none());
        assert!(storage.get_session(session_id).unwrap().is_none());
        assert!(storage.delete_plan(plan_id).is_err());
    }

    #[test]
    fn test_list_plans_newest_first() {
        let mut storage = setup();
        let a = storage
            .create_plan(&PlanRecord::new("A", "lecture", config()))
            .unwrap();
        let b = storage
            .create_plan(&PlanRecord::new("B", "section", config()))
            .unwrap();

        let plans = storage.list_plans().unwrap();
        let ids: Vec<Option<i64>> = plans.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![Some(b), Some(a)]);
    }

    #[test]
    fn test_stats_and_reset() {
        let mut storage = setup();
        let plan_id = storage
            .create_plan(&PlanRecord::new("Rust", "lecture", config()))
            .unwrap();
        let id = storage
            .add_session(plan_id, 0, &session("L1", Some(Category::Lecture), "2024-01-01T09:00", 11))
            .unwrap();
        storage
            .add_session(plan_id, 1, &session("L2", Some(Category::Lecture), "2024-01-02T09:00", 18))
            .unwrap();
        storage.set_session_status(id, SessionStatus::Comfortable).unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.plan_count, 1);
        assert_eq!(stats.session_count, 2);
        assert_eq!(stats.reviewed_count, 1);
        assert_eq!(stats.total_minutes, 29);
        assert_eq!(stats.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(stats.db_size.is_none());

        storage.reset().unwrap();
        let stats = storage.stats().unwrap();
        assert_eq!(stats.plan_count, 0);
        assert_eq!(stats.session_count, 0);
        assert!(storage.is_initialized().unwrap());
    }

    #[test]
    fn test_unknown_status_fails_row() {
        let mut storage = setup();
        let plan_id = storage
            .create_plan(&PlanRecord::new("Rust", "lecture", config()))
            .unwrap();
        let id = storage
            .add_session(plan_id, 0, &session("L1", None, "2024-01-01T09:00", 1))
            .unwrap();
        storage
            .conn
            .execute("UPDATE sessions SET status = 'done' WHERE id = ?", params![id])
            .unwrap();
        assert!(storage.get_session(id).is_err());
    }
}
