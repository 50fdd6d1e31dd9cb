//! Duration text parsing.
//!
//! Course outlines describe lengths in two shapes: clock-like item
//! durations (`MM:SS`, `HH:MM:SS`) and free-text section totals
//! (`"2hr 15min"`). Both parsers are lenient: text they cannot read is
//! a zero-length duration, never an error.

use regex::Regex;
use std::sync::OnceLock;

/// Parses a clock-like item duration into whole minutes.
///
/// Accepts `minutes:seconds` or `hours:minutes:seconds`. Any partial
/// minute of seconds rounds up, so a session always covers the whole item.
/// Any other shape (wrong field count, non-numeric fields) yields 0.
///
/// # Examples
///
/// ```
/// use course_planner::duration::parse_item_duration;
///
/// assert_eq!(parse_item_duration("10:42"), 11);
/// assert_eq!(parse_item_duration("1:02:30"), 63);
/// assert_eq!(parse_item_duration("5 questions"), 0);
/// ```
#[must_use]
pub fn parse_item_duration(text: &str) -> u32 {
    let fields: Option<Vec<u32>> = text
        .trim()
        .split(':')
        .map(|field| field.trim().parse::<u32>().ok())
        .collect();

    match fields.as_deref() {
        Some(&[minutes, seconds]) => minutes.saturating_add(seconds.div_ceil(60)),
        Some(&[hours, minutes, seconds]) => hours
            .saturating_mul(60)
            .saturating_add(minutes)
            .saturating_add(seconds.div_ceil(60)),
        _ => 0,
    }
}

/// Parses a free-text aggregate duration such as `"1hr 5min"` into minutes.
///
/// The hour and minute tokens are each optional and matched
/// case-insensitively; a missing token counts as zero.
///
/// # Examples
///
/// ```
/// use course_planner::duration::parse_aggregate_duration;
///
/// assert_eq!(parse_aggregate_duration("2hr 15min"), 135);
/// assert_eq!(parse_aggregate_duration("45min"), 45);
/// assert_eq!(parse_aggregate_duration(""), 0);
/// ```
#[must_use]
pub fn parse_aggregate_duration(text: &str) -> u32 {
    let hours = capture_number(hour_regex(), text);
    let minutes = capture_number(minute_regex(), text);
    hours.saturating_mul(60).saturating_add(minutes)
}

/// Returns true if `text` reads as a clock duration the item parser accepts.
#[must_use]
pub fn is_clock_duration(text: &str) -> bool {
    let fields: Vec<&str> = text.trim().split(':').collect();
    (fields.len() == 2 || fields.len() == 3)
        && fields
            .iter()
            .all(|f| !f.trim().is_empty() && f.trim().chars().all(|c| c.is_ascii_digit()))
}

fn capture_number(re: &Regex, text: &str) -> u32 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[allow(clippy::expect_used)]
fn hour_regex() -> &'static Regex {
    static HOUR: OnceLock<Regex> = OnceLock::new();
    HOUR.get_or_init(|| Regex::new(r"(?i)(\d+)\s*(?:hr|hour)").expect("valid regex"))
}

#[allow(clippy::expect_used)]
fn minute_regex() -> &'static Regex {
    static MINUTE: OnceLock<Regex> = OnceLock::new();
    MINUTE.get_or_init(|| Regex::new(r"(?i)(\d+)\s*min").expect("valid regex"))
}
