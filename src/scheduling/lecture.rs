//! Per-lecture scheduling strategy.
//!
//! Walks lectures in study order and gives each one its own session. A
//! lecture is never split: if it does not fit in what is left of the
//! current study day it moves to the next one, and a lecture longer than a
//! whole day is placed in one block whose overflow is charged against the
//! following day's budget.

use crate::core::{Course, StudySession, classify};
use crate::duration::parse_item_duration;
use crate::error::Result;
use crate::scheduling::traits::{ScheduleSummary, Scheduler};
use crate::scheduling::{PlanConfig, ScheduleCursor};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// One session per lecture, in input order.
///
/// # Examples
///
/// ```
/// use course_planner::core::{Course, Section};
/// use course_planner::scheduling::{LectureScheduler, PlanConfig, Scheduler, parse_start};
///
/// let course = Course::new("Demo").section(
///     Section::new("Intro", "")
///         .lecture("L1", "10:42")
///         .lecture("L2", "17:43"),
/// );
/// let config = PlanConfig::new(parse_start("2024-01-01T09:00").unwrap(), 20, 1, 1.0).unwrap();
/// let plan = LectureScheduler::new().plan(&course, &config).unwrap();
///
/// // L2 (18 min) does not fit in the 9 minutes left, so it moves a day.
/// assert_eq!(plan.sessions[1].start, parse_start("2024-01-02T09:00").unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LectureScheduler;

impl LectureScheduler {
    /// Creates a per-lecture scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Playback-adjusted length, rounded down to whole minutes.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn effective_minutes(raw_minutes: u32, speed_factor: f64) -> u32 {
    (f64::from(raw_minutes) / speed_factor).floor() as u32
}

impl Scheduler for LectureScheduler {
    fn schedule(
        &self,
        course: &Course,
        config: &PlanConfig,
        emit: &mut dyn FnMut(StudySession) -> Result<()>,
    ) -> Result<ScheduleSummary> {
        config.validate()?;

        let mut cursor = ScheduleCursor::new(config);
        let mut summary = ScheduleSummary::new(self.name());
        let mut last_day: Option<NaiveDate> = None;

        for lecture in course.lectures() {
            let minutes = effective_minutes(parse_item_duration(&lecture.duration), config.speed_factor);
            let needed = i64::from(minutes);

            // Look ahead: move to a fresh day before placing what won't fit.
            if needed > cursor.remaining() {
                cursor.advance_to_next_day()?;
            }

            let available = cursor.remaining();
            let session = StudySession::starting_at(
                lecture.title.as_str(),
                Some(classify(&lecture.title)),
                cursor.current(),
                minutes,
            )?;
            cursor.consume(needed);

            if cursor.remaining() < 0 && needed > 0 {
                // Longer than a whole day: the next day starts already
                // charged with the overflow.
                let overflow = needed - available;
                cursor.advance_to_next_day()?;
                cursor.set_remaining(cursor.daily_budget() - overflow);
                warn!(
                    lecture = %lecture.title,
                    minutes,
                    budget = cursor.daily_budget(),
                    overflow,
                    "lecture exceeds the daily budget; scheduled as one block"
                );
            } else {
                cursor.set_current(session.end);
            }

            let day = session.start.date();
            summary.record(&session, last_day != Some(day));
            last_day = Some(day);

            debug!(
                label = %session.label,
                category = session.category_label(),
                start = %session.start,
                end = %session.end,
                remaining = cursor.remaining(),
                "scheduled lecture"
            );
            emit(session)?;
        }

        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "lecture"
    }

    fn description(&self) -> &'static str {
        "One session per lecture; lectures are never split and roll to the next study day when they don't fit"
    }
}
