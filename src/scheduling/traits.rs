//! Scheduler trait definition.
//!
//! Defines the common "allocate a course into sessions" capability shared
//! by every scheduling strategy.

use crate::core::{Course, StudySession};
use crate::error::Result;
use crate::scheduling::PlanConfig;
use serde::Serialize;

/// Trait for strategies that turn a course into study sessions.
///
/// Sessions are emitted one at a time, in order, through a callback so a
/// caller can persist each one as soon as it exists. Implementations own
/// a fresh [`ScheduleCursor`](crate::scheduling::ScheduleCursor) per call
/// and keep no state between runs.
///
/// # Examples
///
/// ```
/// use course_planner::core::{Course, Section};
/// use course_planner::scheduling::{LectureScheduler, PlanConfig, Scheduler, parse_start};
///
/// let course = Course::new("Demo")
///     .section(Section::new("Intro", "").lecture("L1", "10:42"));
/// let config = PlanConfig::new(parse_start("2024-01-01T09:00").unwrap(), 20, 1, 1.0).unwrap();
/// let plan = LectureScheduler::new().plan(&course, &config).unwrap();
/// assert_eq!(plan.sessions.len(), 1);
/// ```
pub trait Scheduler: Send + Sync {
    /// Allocates `course` into sessions, calling `emit` for each in order.
    ///
    /// The configuration is validated before anything is emitted.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration, a timestamp that
    /// leaves the calendar range, or any error returned by `emit` (which
    /// stops the run).
    fn schedule(
        &self,
        course: &Course,
        config: &PlanConfig,
        emit: &mut dyn FnMut(StudySession) -> Result<()>,
    ) -> Result<ScheduleSummary>;

    /// Returns the name of the scheduling strategy.
    fn name(&self) -> &'static str;

    /// Returns a description of the scheduling strategy.
    fn description(&self) -> &'static str {
        "No description available"
    }

    /// Runs [`Scheduler::schedule`] and collects the sessions.
    ///
    /// # Errors
    ///
    /// Same as [`Scheduler::schedule`].
    fn plan(&self, course: &Course, config: &PlanConfig) -> Result<Plan> {
        let mut sessions = Vec::new();
        let summary = self.schedule(course, config, &mut |session| {
            sessions.push(session);
            Ok(())
        })?;
        Ok(Plan { sessions, summary })
    }
}

/// A section tail too short to be worth a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFragment {
    /// Section the fragment belongs to.
    pub section: String,

    /// Part number the fragment would have had.
    pub part: u32,

    /// Discarded minutes.
    pub minutes: u32,
}

/// Totals reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    /// Strategy that produced the sessions.
    pub strategy: String,

    /// Number of sessions emitted.
    pub session_count: usize,

    /// Sum of session lengths in minutes.
    pub total_minutes: u64,

    /// Number of distinct study days used.
    pub study_days: usize,

    /// Fragments deliberately left unscheduled.
    pub skipped: Vec<SkippedFragment>,
}

impl ScheduleSummary {
    /// Creates an empty summary for a strategy.
    #[must_use]
    pub fn new(strategy: &str) -> Self {
        Self {
            strategy: strategy.to_string(),
            ..Self::default()
        }
    }

    /// Records an emitted session. `new_day` is true when it starts a
    /// study day not seen before in this run.
    pub fn record(&mut self, session: &StudySession, new_day: bool) {
        self.session_count += 1;
        self.total_minutes += u64::from(session.duration_minutes);
        if new_day {
            self.study_days += 1;
        }
    }

    /// Minutes discarded across all skipped fragments.
    #[must_use]
    pub fn skipped_minutes(&self) -> u64 {
        self.skipped.iter().map(|f| u64::from(f.minutes)).sum()
    }
}

/// Sessions collected from a full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Sessions in emission order.
    pub sessions: Vec<StudySession>,

    /// Run totals.
    pub summary: ScheduleSummary,
}
