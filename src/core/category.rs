//! Lecture classification.
//!
//! Maps a lecture title to a content-type tag by keyword.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content type of a scheduled item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Graded question set.
    Quiz,
    /// Hands-on practice exercise.
    Practice,
    /// Coding or design challenge.
    Challenge,
    /// Assignment to hand in.
    Assignment,
    /// Anything else.
    Lecture,
}

/// Keywords tested in order; the first one found in the title wins.
const KEYWORDS: [(&str, Category); 4] = [
    ("quiz", Category::Quiz),
    ("practice", Category::Practice),
    ("challenge", Category::Challenge),
    ("assignment", Category::Assignment),
];

impl Category {
    /// Returns the capitalized label for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quiz => "Quiz",
            Self::Practice => "Practice",
            Self::Challenge => "Challenge",
            Self::Assignment => "Assignment",
            Self::Lecture => "Lecture",
        }
    }

    /// Parses a label produced by [`Category::as_str`] (case-insensitive).
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "quiz" => Some(Self::Quiz),
            "practice" => Some(Self::Practice),
            "challenge" => Some(Self::Challenge),
            "assignment" => Some(Self::Assignment),
            "lecture" => Some(Self::Lecture),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a lecture by its title.
///
/// # Examples
///
/// ```
/// use course_planner::core::{Category, classify};
///
/// assert_eq!(classify("Quiz 1"), Category::Quiz);
/// assert_eq!(classify("Practice Challenge"), Category::Practice);
/// assert_eq!(classify("Intro"), Category::Lecture);
/// ```
#[must_use]
pub fn classify(title: &str) -> Category {
    let lowered = title.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or(Category::Lecture, |(_, category)| *category)
}
