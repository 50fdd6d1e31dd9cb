//! Section chunking strategy.
//!
//! Treats each section's total length as one divisible quantity and cuts
//! it into day-sized parts, ignoring individual lecture boundaries. Every
//! part starts a fresh study day; leftovers are never carried between
//! sections. A tail shorter than [`SKIP_THRESHOLD_MINUTES`] is dropped.

use crate::core::{Course, StudySession};
use crate::duration::parse_aggregate_duration;
use crate::error::Result;
use crate::scheduling::traits::{ScheduleSummary, Scheduler, SkippedFragment};
use crate::scheduling::{PlanConfig, SKIP_THRESHOLD_MINUTES, ScheduleCursor};
use tracing::{debug, info};

/// Splits sections into `"<title> p.<n>"` parts of at most one daily budget.
///
/// # Examples
///
/// ```
/// use course_planner::core::{Course, Section};
/// use course_planner::scheduling::{PlanConfig, Scheduler, SectionChunker, parse_start};
///
/// let course = Course::new("Demo").section(Section::new("Basics", "1hr 5min"));
/// let config = PlanConfig::new(parse_start("2024-01-01T09:00").unwrap(), 30, 1, 1.0).unwrap();
/// let plan = SectionChunker::new().plan(&course, &config).unwrap();
///
/// // 30 + 30, and the last 5 minutes are too short to schedule.
/// assert_eq!(plan.sessions.len(), 2);
/// assert_eq!(plan.sessions[1].label, "Basics p.2");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionChunker;

impl SectionChunker {
    /// Creates a section chunker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Playback-adjusted length, rounded to the nearest minute.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_minutes(raw_minutes: u32, speed_factor: f64) -> u32 {
    (f64::from(raw_minutes) / speed_factor).round() as u32
}

impl Scheduler for SectionChunker {
    fn schedule(
        &self,
        course: &Course,
        config: &PlanConfig,
        emit: &mut dyn FnMut(StudySession) -> Result<()>,
    ) -> Result<ScheduleSummary> {
        config.validate()?;

        let mut cursor = ScheduleCursor::new(config);
        let mut summary = ScheduleSummary::new(self.name());

        for section in &course.sections {
            let mut remaining = scaled_minutes(
                parse_aggregate_duration(&section.aggregate_duration),
                config.speed_factor,
            );
            let mut part: u32 = 1;

            while remaining > 0 {
                if remaining < SKIP_THRESHOLD_MINUTES {
                    info!(
                        section = %section.title,
                        part,
                        minutes = remaining,
                        "skipping section tail shorter than {SKIP_THRESHOLD_MINUTES} minutes"
                    );
                    summary.skipped.push(SkippedFragment {
                        section: section.title.clone(),
                        part,
                        minutes: remaining,
                    });
                    break;
                }

                let chunk = config.daily_budget_minutes.min(remaining);
                let session = StudySession::starting_at(
                    format!("{} p.{part}", section.title),
                    None,
                    cursor.current(),
                    chunk,
                )?;
                remaining -= chunk;
                cursor.step_cadence()?;
                part += 1;

                // Each part sits on its own study day.
                summary.record(&session, true);
                debug!(
                    label = %session.label,
                    start = %session.start,
                    end = %session.end,
                    left = remaining,
                    "scheduled section part"
                );
                emit(session)?;
            }
        }

        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "section"
    }

    fn description(&self) -> &'static str {
        "Whole sections cut into day-sized parts; tails under 20 minutes are dropped"
    }
}
