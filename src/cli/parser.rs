//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::scheduling::{DEFAULT_CADENCE_DAYS, DEFAULT_DAILY_BUDGET, DEFAULT_SPEED_FACTOR};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Course planner: turn a course outline into dated study sessions.
///
/// Reads a course (sections of timed lectures) as JSON and spreads it over
/// study days that respect a daily time budget, a cadence between study
/// days, and a playback speed.
#[derive(Parser, Debug)]
#[command(name = "course-planner")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the planner database file.
    ///
    /// Defaults to `.course-planner/planner.db` in the current directory.
    #[arg(short, long, env = "COURSE_PLANNER_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the planner database.
    ///
    /// Creates the database file and schema if they don't exist.
    Init {
        /// Force re-initialization (destroys existing data).
        #[arg(short, long)]
        force: bool,
    },

    /// Show stored plan statistics.
    Status,

    /// Delete all saved plans.
    Reset {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List scheduling strategies.
    Strategies,

    /// Compute study sessions for a course file.
    Plan {
        /// Path to the course JSON file.
        course: PathBuf,

        /// First session start, e.g. 2024-01-01T09:00.
        #[arg(short, long)]
        start: String,

        /// Study minutes per study day (1-1439).
        #[arg(short, long, default_value_t = DEFAULT_DAILY_BUDGET)]
        budget: u32,

        /// Days between study days.
        #[arg(short, long, default_value_t = DEFAULT_CADENCE_DAYS)]
        cadence: u32,

        /// Video playback speed multiplier.
        #[arg(long, default_value_t = DEFAULT_SPEED_FACTOR)]
        speed: f64,

        /// Scheduling strategy (lecture, section).
        #[arg(long, default_value = "lecture")]
        strategy: String,

        /// Duration (MM:SS) given to quizzes listed by question count.
        #[arg(long)]
        quiz_duration: Option<String>,

        /// Save the plan to the database.
        #[arg(long)]
        save: bool,
    },

    /// List saved plans.
    #[command(name = "plans", alias = "ls")]
    ListPlans,

    /// Show the sessions of a saved plan.
    #[command(name = "show")]
    ShowPlan {
        /// Plan ID.
        plan: i64,
    },

    /// Set the review status of a session.
    Mark {
        /// Session ID.
        session: i64,

        /// Status: pending, comfortable, ok, need-more-info, skipped.
        status: String,
    },

    /// Flag a session for another look.
    Review {
        /// Session ID.
        session: i64,

        /// Clear the flag instead of setting it.
        #[arg(long)]
        clear: bool,
    },

    /// Delete a saved plan.
    #[command(name = "delete", alias = "rm")]
    DeletePlan {
        /// Plan ID.
        plan: i64,

        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Export a saved plan with its sessions as JSON.
    Export {
        /// Plan ID.
        plan: i64,

        /// Output file path (stdout if not specified).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON.
        #[arg(short, long)]
        pretty: bool,
    },
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }
}
