//! Scheduling strategies for course planning.
//!
//! This module provides a trait-based system for allocating a course into
//! dated study sessions. Two strategies are available, both driven by the
//! same [`ScheduleCursor`]:
//!
//! - **Lecture**: one session per lecture, never split, rolled to the next
//!   study day when it doesn't fit
//! - **Section**: each section cut into day-sized parts, short tails dropped

pub mod config;
pub mod cursor;
pub mod lecture;
pub mod section;
pub mod traits;

pub use config::{
    DEFAULT_CADENCE_DAYS, DEFAULT_DAILY_BUDGET, DEFAULT_SPEED_FACTOR, MINUTES_PER_DAY, PlanConfig,
    parse_start,
};
pub use cursor::ScheduleCursor;
pub use lecture::LectureScheduler;
pub use section::SectionChunker;
pub use traits::{Plan, ScheduleSummary, Scheduler, SkippedFragment};

/// Section tails shorter than this many minutes are not scheduled.
pub const SKIP_THRESHOLD_MINUTES: u32 = 20;

/// Creates the default scheduler (per lecture).
#[must_use]
pub const fn default_scheduler() -> LectureScheduler {
    LectureScheduler::new()
}

/// Creates a scheduler by name.
///
/// # Arguments
///
/// * `name` - Strategy name: "lecture" or "section".
///
/// # Errors
///
/// Returns [`crate::error::ScheduleError::UnknownStrategy`] if the strategy name is not recognized.
pub fn create_scheduler(name: &str) -> crate::error::Result<Box<dyn Scheduler>> {
    match name.to_lowercase().as_str() {
        "lecture" => Ok(Box::new(LectureScheduler::new())),
        "section" => Ok(Box::new(SectionChunker::new())),
        _ => Err(crate::error::ScheduleError::UnknownStrategy {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Lists available scheduling strategy names.
#[must_use]
pub fn available_strategies() -> Vec<&'static str> {
    vec!["lecture", "section"]
}
