//! Course outline input model.
//!
//! A course is produced once by whatever extracted it (a page scraper, a
//! hand-written JSON file) and is read-only while a plan is computed.
//! Section and lecture order is the study order.

use crate::duration::is_clock_duration;
use serde::{Deserialize, Serialize};

/// A course: an ordered list of sections.
///
/// The JSON shape matches what a course page extractor produces:
///
/// ```
/// use course_planner::core::Course;
///
/// let json = r#"{
///     "title": "Rust Basics",
///     "sections": [{
///         "section_title": "Intro",
///         "time": "29min",
///         "lectures": [
///             {"lecture_title": "Welcome", "duration": "10:42"},
///             {"lecture_title": "Setup", "duration": "17:43"}
///         ]
///     }]
/// }"#;
/// let course: Course = serde_json::from_str(json).unwrap();
/// assert_eq!(course.lecture_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course title.
    pub title: String,

    /// Sections in study order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A section of a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title.
    #[serde(rename = "section_title")]
    pub title: String,

    /// Free-text total length such as `"1hr 5min"`; only the section
    /// chunking strategy reads it.
    #[serde(rename = "time", alias = "aggregate_duration", default)]
    pub aggregate_duration: String,

    /// Lectures in study order.
    #[serde(default)]
    pub lectures: Vec<Lecture>,
}

/// A single lecture (video, quiz, exercise).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    /// Lecture title.
    #[serde(rename = "lecture_title")]
    pub title: String,

    /// Duration text, `MM:SS` or `HH:MM:SS`, or a placeholder such as
    /// `"5 questions"` for quizzes.
    #[serde(default)]
    pub duration: String,
}

impl Course {
    /// Creates an empty course with a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Appends a section.
    #[must_use]
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Total number of lectures across all sections.
    #[must_use]
    pub fn lecture_count(&self) -> usize {
        self.sections.iter().map(|s| s.lectures.len()).sum()
    }

    /// Iterates lectures in study order.
    pub fn lectures(&self) -> impl Iterator<Item = &Lecture> {
        self.sections.iter().flat_map(|s| s.lectures.iter())
    }

    /// Returns a copy where every question-count placeholder duration is
    /// replaced by `default`.
    ///
    /// Lectures whose duration is already clock-like are left untouched.
    #[must_use]
    pub fn with_quiz_duration(mut self, default: &str) -> Self {
        for lecture in self.sections.iter_mut().flat_map(|s| s.lectures.iter_mut()) {
            if lecture.is_question_count() {
                lecture.duration = default.to_string();
            }
        }
        self
    }
}

impl Section {
    /// Creates a section with no lectures.
    #[must_use]
    pub fn new(title: impl Into<String>, aggregate_duration: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            aggregate_duration: aggregate_duration.into(),
            lectures: Vec::new(),
        }
    }

    /// Appends a lecture.
    #[must_use]
    pub fn lecture(mut self, title: impl Into<String>, duration: impl Into<String>) -> Self {
        self.lectures.push(Lecture::new(title, duration));
        self
    }
}

impl Lecture {
    /// Creates a lecture.
    #[must_use]
    pub fn new(title: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration: duration.into(),
        }
    }

    /// Returns true if the duration is a quiz's question count rather
    /// than a clock duration.
    #[must_use]
    pub fn is_question_count(&self) -> bool {
        !is_clock_duration(&self.duration) && self.duration.to_lowercase().contains("question")
    }
}
