//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{StoredSession, StudySession};
use crate::error::Error;
use crate::scheduling::{Plan, ScheduleSummary};
use crate::storage::{PlanRecord, StorageStats};
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a status response.
#[must_use]
pub fn format_status(stats: &StorageStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_status_text(stats),
        OutputFormat::Json => format_json(stats),
    }
}

fn format_status_text(stats: &StorageStats) -> String {
    let mut output = String::new();
    output.push_str("Course Planner Status\n");
    output.push_str("=====================\n\n");
    let _ = writeln!(output, "  Plans:         {}", stats.plan_count);
    let _ = writeln!(output, "  Sessions:      {}", stats.session_count);
    let _ = writeln!(output, "  Reviewed:      {}", stats.reviewed_count);
    let _ = writeln!(
        output,
        "  Scheduled:     {}",
        format_minutes(stats.total_minutes)
    );
    let _ = writeln!(output, "  Schema:        v{}", stats.schema_version);
    if let Some(size) = stats.db_size {
        let _ = writeln!(output, "  DB size:       {size} bytes");
    }
    output
}

/// Formats a freshly computed plan.
#[must_use]
pub fn format_plan(
    course_title: &str,
    plan: &Plan,
    saved_as: Option<i64>,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => format_plan_text(course_title, plan, saved_as),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct PlanOutput<'a> {
                course: &'a str,
                plan_id: Option<i64>,
                sessions: &'a [StudySession],
                summary: &'a ScheduleSummary,
            }
            format_json(&PlanOutput {
                course: course_title,
                plan_id: saved_as,
                sessions: &plan.sessions,
                summary: &plan.summary,
            })
        }
    }
}

fn format_plan_text(course_title: &str, plan: &Plan, saved_as: Option<i64>) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Plan for: {course_title} ({} strategy)",
        plan.summary.strategy
    );

    if plan.sessions.is_empty() {
        output.push_str("No sessions scheduled.\n");
    } else {
        push_session_header(&mut output, "#");
        for (i, session) in plan.sessions.iter().enumerate() {
            push_session_row(&mut output, &(i + 1).to_string(), session, None);
        }
    }

    output.push('\n');
    let _ = writeln!(
        output,
        "Total: {} sessions, {} over {} study days",
        plan.summary.session_count,
        format_minutes(plan.summary.total_minutes),
        plan.summary.study_days
    );
    for fragment in &plan.summary.skipped {
        let _ = writeln!(
            output,
            "Skipped: {} p.{} ({} min, below threshold)",
            fragment.section, fragment.part, fragment.minutes
        );
    }
    if let Some(id) = saved_as {
        let _ = writeln!(output, "Saved as plan {id}");
    }
    output
}

/// Formats the list of saved plans.
#[must_use]
pub fn format_plan_list(plans: &[PlanRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_plan_list_text(plans),
        OutputFormat::Json => format_json(&plans),
    }
}

fn format_plan_list_text(plans: &[PlanRecord]) -> String {
    if plans.is_empty() {
        return "No plans found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Plans:\n");
    let _ = writeln!(
        output,
        "{:<6} {:<28} {:<9} {:<17} {:<9} Total",
        "ID", "Course", "Strategy", "Start", "Sessions"
    );
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for plan in plans {
        let id = plan.id.map_or_else(|| "-".to_string(), |i| i.to_string());
        let _ = writeln!(
            output,
            "{:<6} {:<28} {:<9} {:<17} {:<9} {}",
            id,
            truncate(&plan.course_title, 28),
            plan.strategy,
            plan.config.start.format("%Y-%m-%d %H:%M"),
            plan.session_count,
            format_minutes(plan.total_minutes)
        );
    }

    output
}

/// Formats a saved plan with its sessions.
#[must_use]
pub fn format_saved_plan(
    plan: &PlanRecord,
    sessions: &[StoredSession],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => format_saved_plan_text(plan, sessions),
        OutputFormat::Json => format_json(&PlanExport { plan, sessions }),
    }
}

fn format_saved_plan_text(plan: &PlanRecord, sessions: &[StoredSession]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Plan {}: {}", plan.id.unwrap_or(0), plan.course_title);
    let _ = writeln!(output, "  Strategy:     {}", plan.strategy);
    let _ = writeln!(
        output,
        "  Budget:       {} min/day every {} day(s) at {}x",
        plan.config.daily_budget_minutes, plan.config.cadence_days, plan.config.speed_factor
    );
    let _ = writeln!(
        output,
        "  Total:        {} sessions, {}",
        plan.session_count,
        format_minutes(plan.total_minutes)
    );

    if sessions.is_empty() {
        output.push_str("\nNo sessions stored.\n");
        return output;
    }

    output.push('\n');
    push_session_header(&mut output, "ID");
    for stored in sessions {
        push_session_row(&mut output, &stored.id.to_string(), &stored.session, Some(stored));
    }
    output
}

/// Formats a plan export document.
///
/// Always JSON; `pretty` selects indentation.
#[must_use]
pub fn format_export(plan: &PlanRecord, sessions: &[StoredSession], pretty: bool) -> String {
    let export = PlanExport { plan, sessions };
    let json = if pretty {
        serde_json::to_string_pretty(&export)
    } else {
        serde_json::to_string(&export)
    };
    let mut output = json.unwrap_or_else(|_| "{}".to_string());
    output.push('\n');
    output
}

#[derive(Serialize)]
struct PlanExport<'a> {
    plan: &'a PlanRecord,
    sessions: &'a [StoredSession],
}

/// Formats the strategy listing.
#[must_use]
pub fn format_strategies(strategies: &[(&str, &str)], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str("Strategies:\n");
            for (name, description) in strategies {
                let _ = writeln!(output, "  {name:<10} {description}");
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct StrategyOutput<'a> {
                name: &'a str,
                description: &'a str,
            }
            let items: Vec<StrategyOutput<'_>> = strategies
                .iter()
                .map(|(name, description)| StrategyOutput { name, description })
                .collect();
            format_json(&items)
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                success: bool,
                error: String,
            }
            format_json(&ErrorOutput {
                success: false,
                error: error.to_string(),
            })
        }
    }
}

fn push_session_header(output: &mut String, first: &str) {
    let _ = writeln!(
        output,
        "{first:<5} {:<10} {:<5} {:<5} {:>5}  {:<10} Label",
        "Date", "Start", "End", "Min", "Category"
    );
    output.push_str(&"-".repeat(80));
    output.push('\n');
}

fn push_session_row(
    output: &mut String,
    first: &str,
    session: &StudySession,
    stored: Option<&StoredSession>,
) {
    let mut label = truncate(&session.label, 36);
    if let Some(stored) = stored {
        let _ = write!(label, " [{}]", stored.status);
        if stored.review {
            label.push_str(" ?");
        }
    }
    let _ = writeln!(
        output,
        "{first:<5} {} {} {} {:>5}  {:<10} {label}",
        session.start.format("%Y-%m-%d"),
        session.start.format("%H:%M"),
        session.end.format("%H:%M"),
        session.duration_minutes,
        session.category_label(),
    );
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats minutes as `"2h 15m"`.
fn format_minutes(minutes: u64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Truncates a string to max characters with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let mut out: String = s.chars().take(max_len - 3).collect();
        out.push_str("...");
        out
    }
}
