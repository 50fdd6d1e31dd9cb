//! CLI layer for the course planner.
//!
//! Provides the command-line interface using clap, with commands for
//! computing plans and for managing saved plans and their sessions.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
