//! Storage layer for course planning.
//!
//! Persists saved plans and their sessions using `SQLite`. Each emitted
//! session becomes one row and can later be marked with a review status.

pub mod schema;
pub mod sqlite;
pub mod traits;

pub use schema::{CURRENT_SCHEMA_VERSION, SCHEMA_SQL};
pub use sqlite::SqliteStorage;
pub use traits::{PlanRecord, Storage, StorageStats};

/// Default database file name.
pub const DEFAULT_DB_NAME: &str = "planner.db";

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".course-planner/planner.db";
