//! Schedule cursor.
//!
//! Tracks where the next session starts and how much of the current study
//! day's budget is left. Rolling over to the next study day always snaps
//! the time of day back to the anchor captured from the run's start, so a
//! multi-day cadence never drifts.

use crate::error::{Result, ScheduleError};
use crate::scheduling::PlanConfig;
use chrono::{Days, NaiveDateTime, NaiveTime, Timelike};

/// Mutable position of one scheduling run.
///
/// Created fresh from a [`PlanConfig`] per run and dropped at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCursor {
    current: NaiveDateTime,
    anchor: NaiveTime,
    daily_budget: i64,
    remaining: i64,
    cadence_days: u32,
}

impl ScheduleCursor {
    /// Creates a cursor at `config.start` with a full day's budget.
    #[must_use]
    pub fn new(config: &PlanConfig) -> Self {
        let start = config.start;
        let anchor = NaiveTime::from_hms_opt(start.hour(), start.minute(), 0).unwrap_or(start.time());
        Self {
            current: start,
            anchor,
            daily_budget: i64::from(config.daily_budget_minutes),
            remaining: i64::from(config.daily_budget_minutes),
            cadence_days: config.cadence_days,
        }
    }

    /// Where the next session starts.
    #[must_use]
    pub const fn current(&self) -> NaiveDateTime {
        self.current
    }

    /// Time of day every study day starts at.
    #[must_use]
    pub const fn anchor(&self) -> NaiveTime {
        self.anchor
    }

    /// Minutes left in the current study day; negative only transiently.
    #[must_use]
    pub const fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Full daily budget in minutes.
    #[must_use]
    pub const fn daily_budget(&self) -> i64 {
        self.daily_budget
    }

    /// Moves the start of the next session.
    pub const fn set_current(&mut self, at: NaiveDateTime) {
        self.current = at;
    }

    /// Consumes budget in the current day.
    pub const fn consume(&mut self, minutes: i64) {
        self.remaining -= minutes;
    }

    /// Overrides the remaining budget (used to carry spillover).
    pub const fn set_remaining(&mut self, minutes: i64) {
        self.remaining = minutes;
    }

    /// Jumps to the next study day at the anchor time with a full budget.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::TimestampOverflow`] past the calendar range.
    pub fn advance_to_next_day(&mut self) -> Result<()> {
        let date = self
            .current
            .date()
            .checked_add_days(Days::new(u64::from(self.cadence_days)))
            .ok_or_else(|| self.overflow())?;
        self.current = date.and_time(self.anchor);
        self.remaining = self.daily_budget;
        tracing::trace!(at = %self.current, "rolled over to next study day");
        Ok(())
    }

    /// Moves forward one cadence step keeping the current time of day.
    ///
    /// Does not touch the remaining budget.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::TimestampOverflow`] past the calendar range.
    pub fn step_cadence(&mut self) -> Result<()> {
        self.current = self
            .current
            .checked_add_days(Days::new(u64::from(self.cadence_days)))
            .ok_or_else(|| self.overflow())?;
        Ok(())
    }

    fn overflow(&self) -> crate::error::Error {
        ScheduleError::TimestampOverflow {
            from: self.current.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::parse_start;

    fn config(start: &str, budget: u32, cadence: u32) -> PlanConfig {
        PlanConfig::new(parse_start(start).unwrap(), budget, cadence, 1.0).unwrap()
    }

    #[test]
    fn test_new_cursor() {
        let cursor = ScheduleCursor::new(&config("2024-01-01T09:30:45", 20, 1));
        assert_eq!(cursor.current(), parse_start("2024-01-01T09:30:45").unwrap());
        assert_eq!(cursor.anchor(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(cursor.remaining(), 20);
        assert_eq!(cursor.daily_budget(), 20);
    }

    #[test]
    fn test_advance_resets_time_and_budget() {
        let mut cursor = ScheduleCursor::new(&config("2024-01-01T09:00", 30, 1));
        cursor.set_current(parse_start("2024-01-01T09:27").unwrap());
        cursor.consume(27);
        cursor.advance_to_next_day().unwrap();
        assert_eq!(cursor.current(), parse_start("2024-01-02T09:00").unwrap());
        assert_eq!(cursor.remaining(), 30);
    }

    #[test]
    fn test_advance_zeroes_seconds() {
        let mut cursor = ScheduleCursor::new(&config("2024-01-01T09:00:59", 30, 1));
        cursor.advance_to_next_day().unwrap();
        assert_eq!(cursor.current(), parse_start("2024-01-02T09:00:00").unwrap());
    }

    #[test]
    fn test_advance_with_multi_day_cadence_keeps_anchor() {
        let mut cursor = ScheduleCursor::new(&config("2024-01-30T18:15", 45, 3));
        cursor.set_current(parse_start("2024-01-30T19:00").unwrap());
        cursor.advance_to_next_day().unwrap();
        assert_eq!(cursor.current(), parse_start("2024-02-02T18:15").unwrap());
        cursor.set_current(parse_start("2024-02-02T23:59").unwrap());
        cursor.advance_to_next_day().unwrap();
        assert_eq!(cursor.current(), parse_start("2024-02-05T18:15").unwrap());
    }

    #[test]
    fn test_step_cadence_keeps_time_of_day() {
        let mut cursor = ScheduleCursor::new(&config("2024-01-01T09:00", 30, 2));
        cursor.consume(10);
        cursor.step_cadence().unwrap();
        assert_eq!(cursor.current(), parse_start("2024-01-03T09:00").unwrap());
        assert_eq!(cursor.remaining(), 20);
    }

    #[test]
    fn test_advance_overflow_is_error() {
        let mut cursor = ScheduleCursor::new(&config("2024-01-01T09:00", 30, 1));
        cursor.set_current(NaiveDateTime::MAX);
        assert!(cursor.advance_to_next_day().is_err());
        assert!(cursor.step_cadence().is_err());
    }
}
