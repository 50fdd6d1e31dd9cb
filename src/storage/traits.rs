//! Storage trait definition.
//!
//! Defines the interface for the record store that receives generated
//! sessions, so the scheduling core never depends on a concrete database.

use crate::core::{SessionStatus, StoredSession, StudySession};
use crate::error::Result;
use crate::scheduling::PlanConfig;
use serde::Serialize;

/// Trait for persistent storage backends.
///
/// Each emitted session becomes one record; the assigned identifier is
/// returned so the caller can log it.
pub trait Storage: Send {
    /// Initializes storage (creates schema).
    ///
    /// Should be idempotent - safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails or the database was
    /// written by a newer schema version.
    fn init(&mut self) -> Result<()>;

    /// Checks if storage is initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    fn is_initialized(&self) -> Result<bool>;

    /// Deletes all plans and sessions but preserves the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn reset(&mut self) -> Result<()>;

    // ==================== Plan Operations ====================

    /// Stores a plan header and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be inserted.
    fn create_plan(&mut self, plan: &PlanRecord) -> Result<i64>;

    /// Retrieves a plan by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_plan(&self, id: i64) -> Result<Option<PlanRecord>>;

    /// Lists all plans, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_plans(&self) -> Result<Vec<PlanRecord>>;

    /// Deletes a plan and its sessions.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PlanNotFound`](crate::error::StorageError::PlanNotFound)
    /// if no such plan exists.
    fn delete_plan(&mut self, id: i64) -> Result<()>;

    // ==================== Session Operations ====================

    /// Stores one session of a plan and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be inserted.
    fn add_session(&mut self, plan_id: i64, position: usize, session: &StudySession)
    -> Result<i64>;

    /// Retrieves a session by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_session(&self, id: i64) -> Result<Option<StoredSession>>;

    /// Retrieves all sessions of a plan in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_sessions(&self, plan_id: i64) -> Result<Vec<StoredSession>>;

    /// Sets the review status of a session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::SessionNotFound`](crate::error::StorageError::SessionNotFound)
    /// if no such session exists.
    fn set_session_status(&mut self, id: i64, status: SessionStatus) -> Result<()>;

    /// Sets or clears the review flag of a session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::SessionNotFound`](crate::error::StorageError::SessionNotFound)
    /// if no such session exists.
    fn set_session_review(&mut self, id: i64, review: bool) -> Result<()>;

    // ==================== Utility Operations ====================

    /// Gets storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if statistics cannot be computed.
    fn stats(&self) -> Result<StorageStats>;
}

/// A saved plan header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRecord {
    /// Unique identifier (assigned by storage layer).
    pub id: Option<i64>,

    /// Title of the planned course.
    pub course_title: String,

    /// Strategy that produced the sessions.
    pub strategy: String,

    /// Configuration the plan was computed with.
    pub config: PlanConfig,

    /// Unix timestamp when the plan was saved.
    pub created_at: i64,

    /// Number of stored sessions (filled in on read).
    pub session_count: usize,

    /// Sum of stored session lengths (filled in on read).
    pub total_minutes: u64,
}

impl PlanRecord {
    /// Creates an unsaved plan header.
    #[must_use]
    pub fn new(course_title: impl Into<String>, strategy: &str, config: PlanConfig) -> Self {
        Self {
            id: None,
            course_title: course_title.into(),
            strategy: strategy.to_string(),
            config,
            created_at: 0,
            session_count: 0,
            total_minutes: 0,
        }
    }
}

/// Storage statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
    /// Number of plans stored.
    pub plan_count: usize,
    /// Total number of sessions across all plans.
    pub session_count: usize,
    /// Sessions no longer pending.
    pub reviewed_count: usize,
    /// Total scheduled minutes across all plans.
    pub total_minutes: u64,
    /// Schema version.
    pub schema_version: u32,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}
