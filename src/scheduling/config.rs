//! Plan configuration.
//!
//! [`PlanConfig`] is passed explicitly into every scheduler call. It is
//! validated up front so that a bad value stops the run before any
//! session is produced.

use crate::error::{ConfigError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Minutes in a day; the daily budget must be strictly below this.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Default daily budget in minutes.
pub const DEFAULT_DAILY_BUDGET: u32 = 60;

/// Default gap between study days.
pub const DEFAULT_CADENCE_DAYS: u32 = 1;

/// Default playback speed.
pub const DEFAULT_SPEED_FACTOR: f64 = 1.0;

/// Accepted start timestamp formats.
const START_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// User-supplied scheduling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// First session start; its hour and minute become the daily anchor.
    pub start: NaiveDateTime,

    /// Study minutes per study day (`1..=1439`).
    pub daily_budget_minutes: u32,

    /// Days between study days (`>= 1`).
    pub cadence_days: u32,

    /// Playback speed multiplier (`> 0`); effective length is divided by it.
    pub speed_factor: f64,
}

impl PlanConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use course_planner::scheduling::{PlanConfig, parse_start};
    ///
    /// let start = parse_start("2024-01-01T09:00").unwrap();
    /// assert!(PlanConfig::new(start, 20, 1, 1.0).is_ok());
    /// assert!(PlanConfig::new(start, 0, 1, 1.0).is_err());
    /// ```
    pub fn new(
        start: NaiveDateTime,
        daily_budget_minutes: u32,
        cadence_days: u32,
        speed_factor: f64,
    ) -> Result<Self> {
        let config = Self {
            start,
            daily_budget_minutes,
            cadence_days,
            speed_factor,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration with default budget, cadence and speed.
    #[must_use]
    pub const fn with_start(start: NaiveDateTime) -> Self {
        Self {
            start,
            daily_budget_minutes: DEFAULT_DAILY_BUDGET,
            cadence_days: DEFAULT_CADENCE_DAYS,
            speed_factor: DEFAULT_SPEED_FACTOR,
        }
    }

    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<()> {
        if self.daily_budget_minutes == 0 || self.daily_budget_minutes >= MINUTES_PER_DAY {
            return Err(ConfigError::InvalidBudget {
                minutes: self.daily_budget_minutes,
            }
            .into());
        }
        if self.cadence_days < 1 {
            return Err(ConfigError::InvalidCadence {
                days: self.cadence_days,
            }
            .into());
        }
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(ConfigError::InvalidSpeed {
                factor: self.speed_factor,
            }
            .into());
        }
        Ok(())
    }
}

/// Parses a start timestamp such as `2024-01-01T09:00` or `2024-01-01 09:00:00`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidStart`] if no accepted format matches.
pub fn parse_start(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();
    START_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| {
            ConfigError::InvalidStart {
                input: text.to_string(),
            }
            .into()
        })
}
