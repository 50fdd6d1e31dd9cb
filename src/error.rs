//! Error types for course planning.
//!
//! This module provides the error hierarchy using `thiserror` for
//! configuration, scheduling, storage, I/O, and CLI commands. Malformed
//! duration text is deliberately absent: the parsers treat it as zero.

use thiserror::Error;

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid plan configuration (rejected before scheduling starts).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scheduling errors.
    #[error("scheduling error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Storage-related errors (database operations).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Plan configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Daily budget outside `1..1440` minutes.
    #[error("daily budget must be between 1 and 1439 minutes, got {minutes}")]
    InvalidBudget {
        /// Budget that was supplied.
        minutes: u32,
    },

    /// Cadence below one day.
    #[error("cadence must be at least 1 day, got {days}")]
    InvalidCadence {
        /// Cadence that was supplied.
        days: u32,
    },

    /// Speed factor that is zero, negative, or not finite.
    #[error("speed factor must be a positive number, got {factor}")]
    InvalidSpeed {
        /// Speed factor that was supplied.
        factor: f64,
    },

    /// Start timestamp that could not be parsed.
    #[error("invalid start timestamp '{input}' (expected YYYY-MM-DDTHH:MM[:SS])")]
    InvalidStart {
        /// Text that was supplied.
        input: String,
    },
}

/// Errors raised while allocating sessions.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Unknown scheduling strategy.
    #[error("unknown scheduling strategy: {name}")]
    UnknownStrategy {
        /// Name of the unknown strategy.
        name: String,
    },

    /// Advancing the cursor left the representable date range.
    #[error("timestamp out of range while advancing from {from}")]
    TimestampOverflow {
        /// Timestamp the cursor was advancing from.
        from: String,
    },
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// Storage not initialized (init command not run).
    #[error("planner database not initialized. Run: course-planner init")]
    NotInitialized,

    /// Plan not found by ID.
    #[error("plan not found: {id}")]
    PlanNotFound {
        /// Plan ID that was not found.
        id: i64,
    },

    /// Session not found by ID.
    #[error("session not found: {id}")]
    SessionNotFound {
        /// Session ID that was not found.
        id: i64,
    },

    /// Schema migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Course file is not valid course JSON.
    #[error("invalid course file: {path}: {reason}")]
    InvalidCourse {
        /// Path to the file.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    /// User cancelled operation.
    #[error("operation cancelled by user")]
    Cancelled,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
