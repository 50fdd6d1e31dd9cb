//! I/O utilities for course planning.
//!
//! Reads course outline files and writes plan exports.

pub mod reader;

pub use reader::{read_course, read_file, write_file};
