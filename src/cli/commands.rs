//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{
    OutputFormat, format_export, format_plan, format_plan_list, format_saved_plan, format_status,
    format_strategies,
};
use crate::cli::parser::{Cli, Commands};
use crate::core::{Course, SessionStatus, StudySession};
use crate::duration::is_clock_duration;
use crate::error::{CommandError, Result, StorageError};
use crate::io::{read_course, write_file};
use crate::scheduling::{Plan, PlanConfig, available_strategies, create_scheduler, parse_start};
use crate::storage::{PlanRecord, SqliteStorage, Storage};
use std::path::Path;
use tracing::{debug, info};

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match &cli.command {
        Commands::Init { force } => cmd_init(&db_path, *force, format),
        Commands::Status => cmd_status(&db_path, format),
        Commands::Reset { yes } => cmd_reset(&db_path, *yes, format),
        Commands::Strategies => Ok(cmd_strategies(format)),
        Commands::Plan {
            course,
            start,
            budget,
            cadence,
            speed,
            strategy,
            quiz_duration,
            save,
        } => {
            let options = PlanOptions {
                start,
                budget: *budget,
                cadence: *cadence,
                speed: *speed,
                strategy,
                quiz_duration: quiz_duration.as_deref(),
            };
            let db = save.then_some(db_path.as_path());
            cmd_plan(course, &options, db, format)
        }
        Commands::ListPlans => cmd_list_plans(&db_path, format),
        Commands::ShowPlan { plan } => cmd_show_plan(&db_path, *plan, format),
        Commands::Mark { session, status } => cmd_mark(&db_path, *session, status, format),
        Commands::Review { session, clear } => cmd_review(&db_path, *session, !*clear, format),
        Commands::DeletePlan { plan, yes } => cmd_delete_plan(&db_path, *plan, *yes, format),
        Commands::Export {
            plan,
            output,
            pretty,
        } => cmd_export(&db_path, *plan, output.as_deref(), *pretty),
    }
}

/// Opens storage and ensures it's initialized.
fn open_storage(db_path: &Path) -> Result<SqliteStorage> {
    let storage = SqliteStorage::open(db_path)?;

    if !storage.is_initialized()? {
        return Err(StorageError::NotInitialized.into());
    }

    Ok(storage)
}

/// Loads a saved plan or fails with [`StorageError::PlanNotFound`].
fn require_plan(storage: &SqliteStorage, id: i64) -> Result<PlanRecord> {
    storage
        .get_plan(id)?
        .ok_or_else(|| StorageError::PlanNotFound { id }.into())
}

/// Scheduling options gathered from the `plan` subcommand.
struct PlanOptions<'a> {
    start: &'a str,
    budget: u32,
    cadence: u32,
    speed: f64,
    strategy: &'a str,
    quiz_duration: Option<&'a str>,
}

impl PlanOptions<'_> {
    fn config(&self) -> Result<PlanConfig> {
        let start = parse_start(self.start)?;
        PlanConfig::new(start, self.budget, self.cadence, self.speed)
    }
}

// ==================== Command Implementations ====================

fn cmd_init(db_path: &Path, force: bool, _format: OutputFormat) -> Result<String> {
    if db_path.exists() && !force {
        return Err(CommandError::ExecutionFailed(
            "Database already exists. Use --force to reinitialize.".to_string(),
        )
        .into());
    }

    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to create directory: {e}"))
        })?;
    }

    if force && db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to remove existing database: {e}"))
        })?;
    }

    let mut storage = SqliteStorage::open(db_path)?;
    storage.init()?;
    info!(path = %db_path.display(), "initialized planner database");

    Ok(format!(
        "Initialized planner database at: {}\n",
        db_path.display()
    ))
}

fn cmd_status(db_path: &Path, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let stats = storage.stats()?;
    Ok(format_status(&stats, format))
}

fn cmd_reset(db_path: &Path, yes: bool, _format: OutputFormat) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm reset. This will delete all saved plans.".to_string(),
        )
        .into());
    }

    let mut storage = open_storage(db_path)?;
    storage.reset()?;

    Ok("Planner state reset successfully.\n".to_string())
}

fn cmd_strategies(format: OutputFormat) -> String {
    let described: Vec<(&str, &str)> = available_strategies()
        .into_iter()
        .filter_map(|name| {
            create_scheduler(name)
                .ok()
                .map(|scheduler| (name, scheduler.description()))
        })
        .collect();
    format_strategies(&described, format)
}

fn cmd_plan(
    course_path: &Path,
    options: &PlanOptions<'_>,
    save_to: Option<&Path>,
    format: OutputFormat,
) -> Result<String> {
    let config = options.config()?;
    let scheduler = create_scheduler(options.strategy)?;
    let course = load_course(course_path, options.quiz_duration)?;

    debug!(
        course = %course.title,
        lectures = course.lecture_count(),
        strategy = scheduler.name(),
        "planning course"
    );

    let Some(db_path) = save_to else {
        let plan = scheduler.plan(&course, &config)?;
        return Ok(format_plan(&course.title, &plan, None, format));
    };

    let mut storage = open_storage(db_path)?;
    let record = PlanRecord::new(course.title.clone(), scheduler.name(), config);
    let plan_id = storage.create_plan(&record)?;

    let mut sessions: Vec<StudySession> = Vec::new();
    let outcome = {
        let mut emit = |session: StudySession| -> Result<()> {
            let id = storage.add_session(plan_id, sessions.len(), &session)?;
            debug!(plan_id, session_id = id, label = %session.label, "stored session");
            sessions.push(session);
            Ok(())
        };
        scheduler.schedule(&course, &config, &mut emit)
    };

    let summary = match outcome {
        Ok(summary) => summary,
        Err(e) => {
            storage.delete_plan(plan_id)?;
            return Err(e);
        }
    };

    info!(plan_id, sessions = summary.session_count, "saved plan");
    let plan = Plan { sessions, summary };
    Ok(format_plan(&course.title, &plan, Some(plan_id), format))
}

/// Reads a course file, filling question-count quiz durations if asked.
fn load_course(path: &Path, quiz_duration: Option<&str>) -> Result<Course> {
    let course = read_course(path)?;
    match quiz_duration {
        None => Ok(course),
        Some(default) if is_clock_duration(default) => Ok(course.with_quiz_duration(default)),
        Some(default) => Err(CommandError::InvalidArgument(format!(
            "quiz duration '{default}' is not MM:SS or HH:MM:SS"
        ))
        .into()),
    }
}

fn cmd_list_plans(db_path: &Path, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let plans = storage.list_plans()?;
    Ok(format_plan_list(&plans, format))
}

fn cmd_show_plan(db_path: &Path, id: i64, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let plan = require_plan(&storage, id)?;
    let sessions = storage.get_sessions(id)?;
    Ok(format_saved_plan(&plan, &sessions, format))
}

fn cmd_mark(db_path: &Path, session: i64, status: &str, _format: OutputFormat) -> Result<String> {
    let Some(parsed) = SessionStatus::parse(status) else {
        return Err(CommandError::InvalidArgument(format!(
            "unknown status '{status}' (expected one of: {})",
            SessionStatus::names().join(", ")
        ))
        .into());
    };

    let mut storage = open_storage(db_path)?;
    storage.set_session_status(session, parsed)?;
    Ok(format!("Session {session} marked {parsed}\n"))
}

fn cmd_review(db_path: &Path, session: i64, review: bool, _format: OutputFormat) -> Result<String> {
    let mut storage = open_storage(db_path)?;
    storage.set_session_review(session, review)?;
    if review {
        Ok(format!("Session {session} flagged for review\n"))
    } else {
        Ok(format!("Session {session} review flag cleared\n"))
    }
}

fn cmd_delete_plan(db_path: &Path, id: i64, yes: bool, _format: OutputFormat) -> Result<String> {
    if !yes {
        return Err(
            CommandError::ExecutionFailed("Use --yes to confirm deletion.".to_string()).into(),
        );
    }

    let mut storage = open_storage(db_path)?;
    let plan = require_plan(&storage, id)?;
    storage.delete_plan(id)?;
    Ok(format!("Deleted plan {id}: {}\n", plan.course_title))
}

fn cmd_export(db_path: &Path, id: i64, output: Option<&Path>, pretty: bool) -> Result<String> {
    let storage = open_storage(db_path)?;
    let plan = require_plan(&storage, id)?;
    let sessions = storage.get_sessions(id)?;
    let content = format_export(&plan, &sessions, pretty);

    if let Some(path) = output {
        write_file(path, &content)?;
        Ok(format!("Exported plan {id} to: {}\n", path.display()))
    } else {
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const COURSE_JSON: &str = r#"{
        "title": "Rust Basics",
        "sections": [
            {
                "section_title": "Intro",
                "time": "29min",
                "lectures": [
                    { "lecture_title": "L1", "duration": "10:42" },
                    { "lecture_title": "L2", "duration": "17:05" },
                    { "lecture_title": "Quiz 1", "duration": "5 questions" }
                ]
            }
        ]
    }"#;

    fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let course_path = temp_dir.path().join("course.json");
        std::fs::write(&course_path, COURSE_JSON).unwrap();
        (temp_dir, db_path, course_path)
    }

    fn options(budget: u32) -> PlanOptions<'static> {
        PlanOptions {
            start: "2024-01-01T09:00",
            budget,
            cadence: 1,
            speed: 1.0,
            strategy: "lecture",
            quiz_duration: None,
        }
    }

    #[test]
    fn test_cmd_init() {
        let (_temp_dir, db_path, _) = setup();
        let result = cmd_init(&db_path, false, OutputFormat::Text);
        assert!(result.is_ok());
        assert!(db_path.exists());
    }

    #[test]
    fn test_cmd_init_already_exists() {
        let (_temp_dir, db_path, _) = setup();

        cmd_init(&db_path, false, OutputFormat::Text).unwrap();

        let result = cmd_init(&db_path, false, OutputFormat::Text);
        assert!(result.is_err());

        let result = cmd_init(&db_path, true, OutputFormat::Text);
        assert!(result.is_ok());
    }

    #[test]
    fn test_cmd_status_requires_init() {
        let (_temp_dir, db_path, _) = setup();
        let err = cmd_status(&db_path, OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("not initialized"));
    }

    #[test]
    fn test_cmd_reset_requires_yes() {
        let (_temp_dir, db_path, _) = setup();
        cmd_init(&db_path, false, OutputFormat::Text).unwrap();
        assert!(cmd_reset(&db_path, false, OutputFormat::Text).is_err());
        assert!(cmd_reset(&db_path, true, OutputFormat::Text).is_ok());
    }

    #[test]
    fn test_cmd_strategies_lists_both() {
        let output = cmd_strategies(OutputFormat::Text);
        assert!(output.contains("lecture"));
        assert!(output.contains("section"));
    }

    #[test]
    fn test_cmd_plan_without_saving() {
        let (_temp_dir, _db_path, course_path) = setup();
        let output = cmd_plan(&course_path, &options(20), None, OutputFormat::Text).unwrap();
        assert!(output.contains("2024-01-01 09:00 09:11"));
        assert!(output.contains("2024-01-02 09:00 09:18"));
        assert!(!output.contains("Saved as plan"));
    }

    #[test]
    fn test_cmd_plan_rejects_bad_config_before_reading() {
        let (_temp_dir, _db_path, course_path) = setup();
        let err = cmd_plan(&course_path, &options(0), None, OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("daily budget"));
    }

    #[test]
    fn test_cmd_plan_unknown_strategy() {
        let (_temp_dir, _db_path, course_path) = setup();
        let mut opts = options(20);
        opts.strategy = "weekly";
        let err = cmd_plan(&course_path, &opts, None, OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("unknown scheduling strategy"));
    }

    #[test]
    fn test_cmd_plan_quiz_duration() {
        let (_temp_dir, _db_path, course_path) = setup();
        let mut opts = options(60);
        opts.quiz_duration = Some("04:00");
        let output = cmd_plan(&course_path, &opts, None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["sessions"][2]["duration_minutes"], 4);
        assert_eq!(value["sessions"][2]["category"], "Quiz");

        opts.quiz_duration = Some("four minutes");
        assert!(cmd_plan(&course_path, &opts, None, OutputFormat::Text).is_err());
    }

    #[test]
    fn test_cmd_plan_save_and_show() {
        let (_temp_dir, db_path, course_path) = setup();
        cmd_init(&db_path, false, OutputFormat::Text).unwrap();

        let output =
            cmd_plan(&course_path, &options(20), Some(&db_path), OutputFormat::Text).unwrap();
        assert!(output.contains("Saved as plan 1"));

        let shown = cmd_show_plan(&db_path, 1, OutputFormat::Text).unwrap();
        assert!(shown.contains("Plan 1: Rust Basics"));
        assert!(shown.contains("[pending]"));

        let listed = cmd_list_plans(&db_path, OutputFormat::Text).unwrap();
        assert!(listed.contains("Rust Basics"));
    }

    #[test]
    fn test_cmd_mark_and_review() {
        let (_temp_dir, db_path, course_path) = setup();
        cmd_init(&db_path, false, OutputFormat::Text).unwrap();
        cmd_plan(&course_path, &options(20), Some(&db_path), OutputFormat::Text).unwrap();

        let storage = open_storage(&db_path).unwrap();
        let first = storage.get_sessions(1).unwrap()[0].id;
        drop(storage);

        cmd_mark(&db_path, first, "need_more_info", OutputFormat::Text).unwrap();
        cmd_review(&db_path, first, true, OutputFormat::Text).unwrap();

        let storage = open_storage(&db_path).unwrap();
        let stored = storage.get_session(first).unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::NeedMoreInfo);
        assert!(stored.review);
    }

    #[test]
    fn test_cmd_mark_unknown_status() {
        let (_temp_dir, db_path, _) = setup();
        cmd_init(&db_path, false, OutputFormat::Text).unwrap();
        let err = cmd_mark(&db_path, 1, "great", OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("need-more-info"));
    }

    #[test]
    fn test_cmd_delete_plan() {
        let (_temp_dir, db_path, course_path) = setup();
        cmd_init(&db_path, false, OutputFormat::Text).unwrap();
        cmd_plan(&course_path, &options(20), Some(&db_path), OutputFormat::Text).unwrap();

        assert!(cmd_delete_plan(&db_path, 1, false, OutputFormat::Text).is_err());
        assert!(cmd_delete_plan(&db_path, 1, true, OutputFormat::Text).is_ok());
        assert!(cmd_show_plan(&db_path, 1, OutputFormat::Text).is_err());
    }

    #[test]
    fn test_cmd_export_to_file() {
        let (temp_dir, db_path, course_path) = setup();
        cmd_init(&db_path, false, OutputFormat::Text).unwrap();
        cmd_plan(&course_path, &options(20), Some(&db_path), OutputFormat::Text).unwrap();

        let out = temp_dir.path().join("export/plan.json");
        let message = cmd_export(&db_path, 1, Some(&out), true).unwrap();
        assert!(message.contains("Exported plan 1"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["plan"]["course_title"], "Rust Basics");
        assert_eq!(value["sessions"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_cmd_export_missing_plan() {
        let (_temp_dir, db_path, _) = setup();
        cmd_init(&db_path, false, OutputFormat::Text).unwrap();
        let err = cmd_export(&db_path, 42, None, false).unwrap_err();
        assert!(err.to_string().contains("plan not found: 42"));
    }
}
