//! Study session records.
//!
//! A [`StudySession`] is one dated, time-bounded unit of study emitted by a
//! scheduler. Once emitted it is never modified by the scheduler; the
//! storage layer wraps it in a [`StoredSession`] to track review progress.

use crate::core::Category;
use crate::error::{Result, ScheduleError};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scheduled block of study time.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use course_planner::core::{Category, StudySession};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
/// let session = StudySession::starting_at("L1", Some(Category::Lecture), start, 11).unwrap();
/// assert_eq!(session.end.format("%H:%M").to_string(), "09:11");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    /// Lecture title, or `"<section> p.<n>"` for section parts.
    pub label: String,

    /// Content type; `None` for section parts.
    pub category: Option<Category>,

    /// Length in minutes.
    pub duration_minutes: u32,

    /// Start time.
    pub start: NaiveDateTime,

    /// End time, always `start + duration_minutes`.
    pub end: NaiveDateTime,
}

impl StudySession {
    /// Creates a session of `duration_minutes` beginning at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::TimestampOverflow`] if the end time is not
    /// representable.
    pub fn starting_at(
        label: impl Into<String>,
        category: Option<Category>,
        start: NaiveDateTime,
        duration_minutes: u32,
    ) -> Result<Self> {
        let end = start
            .checked_add_signed(Duration::minutes(i64::from(duration_minutes)))
            .ok_or_else(|| ScheduleError::TimestampOverflow {
                from: start.to_string(),
            })?;

        Ok(Self {
            label: label.into(),
            category,
            duration_minutes,
            start,
            end,
        })
    }

    /// Category label, or an empty string when the session has none.
    #[must_use]
    pub fn category_label(&self) -> &'static str {
        self.category.map_or("", Category::as_str)
    }
}

/// Review status a learner assigns to a studied session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    /// Not reviewed yet.
    #[default]
    Pending,
    /// Understood well.
    Comfortable,
    /// Understood well enough.
    Ok,
    /// Needs another pass.
    NeedMoreInfo,
    /// Deliberately skipped.
    Skipped,
}

impl SessionStatus {
    /// Stable storage/CLI name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Comfortable => "comfortable",
            Self::Ok => "ok",
            Self::NeedMoreInfo => "need-more-info",
            Self::Skipped => "skipped",
        }
    }

    /// Parses a status name (case-insensitive; `_` and `-` interchangeable).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "pending" => Some(Self::Pending),
            "comfortable" => Some(Self::Comfortable),
            "ok" => Some(Self::Ok),
            "need-more-info" => Some(Self::NeedMoreInfo),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }

    /// All status names, for help and error messages.
    #[must_use]
    pub const fn names() -> [&'static str; 5] {
        ["pending", "comfortable", "ok", "need-more-info", "skipped"]
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A session as persisted by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Row identifier.
    pub id: i64,

    /// Owning plan.
    pub plan_id: i64,

    /// 0-based position in the plan.
    pub position: usize,

    /// The scheduled session.
    #[serde(flatten)]
    pub session: StudySession,

    /// Review status.
    pub status: SessionStatus,

    /// Flagged for a second look.
    pub review: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_end_is_start_plus_duration() {
        let session = StudySession::starting_at("L2", None, at(23, 50), 18).unwrap();
        assert_eq!(session.end, at(23, 50) + Duration::minutes(18));
        assert_eq!(session.end.date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_zero_length_session() {
        let session = StudySession::starting_at("Quiz", Some(Category::Quiz), at(9, 0), 0).unwrap();
        assert_eq!(session.start, session.end);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let result = StudySession::starting_at("x", None, NaiveDateTime::MAX, 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_category_label() {
        let part = StudySession::starting_at("Intro p.1", None, at(9, 0), 30).unwrap();
        assert_eq!(part.category_label(), "");
        let quiz = StudySession::starting_at("Quiz", Some(Category::Quiz), at(9, 0), 5).unwrap();
        assert_eq!(quiz.category_label(), "Quiz");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(SessionStatus::parse("OK"), Some(SessionStatus::Ok));
        assert_eq!(
            SessionStatus::parse("need_more_info"),
            Some(SessionStatus::NeedMoreInfo)
        );
        assert_eq!(SessionStatus::parse("done"), None);
        for name in SessionStatus::names() {
            let status = SessionStatus::parse(name).unwrap();
            assert_eq!(status.as_str(), name);
        }
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(SessionStatus::default(), SessionStatus::Pending);
    }

    #[test]
    fn test_session_serializes_timestamps() {
        let session = StudySession::starting_at("L1", Some(Category::Lecture), at(9, 0), 11).unwrap();
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"start\":\"2024-01-01T09:00:00\""));
        assert!(json.contains("\"end\":\"2024-01-01T09:11:00\""));
    }
}
