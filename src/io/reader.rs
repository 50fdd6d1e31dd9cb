//! File reading and writing.
//!
//! Course outlines arrive as JSON files written by an external extractor;
//! this module loads them and writes plan exports back out.

use crate::core::Course;
use crate::error::{IoError, Result};
use std::path::Path;

/// Maximum course file size to read into memory (16MB).
const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Reads a UTF-8 text file into a string.
///
/// # Errors
///
/// Returns an error if the file doesn't exist, is too large, or can't be read.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if !path_ref.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    let size = std::fs::metadata(path_ref)
        .map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?
        .len();

    if size > MAX_FILE_SIZE {
        return Err(IoError::ReadFailed {
            path: path_str,
            reason: format!("file too large: {size} bytes (max: {MAX_FILE_SIZE} bytes)"),
        }
        .into());
    }

    std::fs::read_to_string(path_ref).map_err(|e| {
        IoError::ReadFailed {
            path: path_str,
            reason: e.to_string(),
        }
        .into()
    })
}

/// Reads and parses a course outline JSON file.
///
/// # Errors
///
/// Returns an error if the file can't be read or isn't a valid course.
pub fn read_course<P: AsRef<Path>>(path: P) -> Result<Course> {
    let path_ref = path.as_ref();
    let content = read_file(path_ref)?;
    let course: Course = serde_json::from_str(&content).map_err(|e| IoError::InvalidCourse {
        path: path_ref.to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!(
        path = %path_ref.display(),
        title = %course.title,
        sections = course.sections.len(),
        lectures = course.lecture_count(),
        "loaded course"
    );
    Ok(course)
}

/// Writes content to a file, creating parent directories if needed.
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if let Some(parent) = path_ref.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| IoError::WriteFailed {
            path: parent.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
    }

    std::fs::write(path_ref, content).map_err(|e| IoError::WriteFailed {
        path: path_str,
        reason: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    const COURSE_JSON: &str = r#"{
        "title": "Rust",
        "sections": [{
            "section_title": "Intro",
            "time": "29min",
            "lectures": [{"lecture_title": "L1", "duration": "10:42"}]
        }]
    }"#;

    #[test]
    fn test_read_course() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("course.json");
        std::fs::write(&path, COURSE_JSON).unwrap();

        let course = read_course(&path).unwrap();
        assert_eq!(course.title, "Rust");
        assert_eq!(course.sections[0].aggregate_duration, "29min");
        assert_eq!(course.lecture_count(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_file("/nonexistent/course.json");
        assert!(matches!(result, Err(Error::Io(IoError::FileNotFound { .. }))));
    }

    #[test]
    fn test_read_course_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"sections\": []}").unwrap();

        let result = read_course(&path);
        assert!(matches!(result, Err(Error::Io(IoError::InvalidCourse { .. }))));
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/plan.json");
        write_file(&path, "{}").unwrap();
        assert_eq!(read_file(&path).unwrap(), "{}");
    }
}
