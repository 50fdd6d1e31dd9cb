//! # Course Planner
//!
//! Turns a course outline into dated study sessions.
//!
//! A course is a list of sections, each holding lectures with a clock
//! duration. The planner walks the course with a cursor that knows the
//! daily time budget, the number of days between study days, and the
//! playback speed, and emits one session per lecture or per day-sized
//! section part.
//!
//! ## Features
//!
//! - **Strategies**: per-lecture scheduling or section chunking
//! - **Classification**: quiz, practice, challenge and assignment tags
//! - **`SQLite` Storage**: saved plans with per-session review status
//! - **CLI**: text or JSON output for every command
//!
//! ## Example
//!
//! ```
//! use course_planner::core::{Course, Section};
//! use course_planner::scheduling::{PlanConfig, create_scheduler, parse_start};
//!
//! let course = Course::new("Rust")
//!     .section(Section::new("Intro", "29min").lecture("L1", "10:42").lecture("L2", "17:05"));
//! let config = PlanConfig::new(parse_start("2024-01-01T09:00").unwrap(), 20, 1, 1.0).unwrap();
//! let plan = create_scheduler("lecture").unwrap().plan(&course, &config).unwrap();
//!
//! assert_eq!(plan.sessions.len(), 2);
//! assert_eq!(plan.sessions[1].start.to_string(), "2024-01-02 09:00:00");
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod cli;
pub mod core;
pub mod duration;
pub mod error;
pub mod io;
pub mod scheduling;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{
    Category, Course, Lecture, Section, SessionStatus, StoredSession, StudySession, classify,
};

// Re-export duration parsing
pub use duration::{is_clock_duration, parse_aggregate_duration, parse_item_duration};

// Re-export scheduling types
pub use scheduling::{
    LectureScheduler, Plan, PlanConfig, ScheduleCursor, ScheduleSummary, Scheduler,
    SectionChunker, SkippedFragment, available_strategies, create_scheduler, parse_start,
};

// Re-export storage types
pub use storage::{DEFAULT_DB_PATH, PlanRecord, SqliteStorage, Storage};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
