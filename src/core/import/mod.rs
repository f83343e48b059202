//! Course list import
//!
//! Loads the course list handed over by the import/manual-entry side of the
//! application. The format is picked from the file extension:
//! - `.json`: an array of course objects
//! - `.toml`: `[[course]]` tables
//! - `.csv`: a curriculum export with a `Courses` section

pub mod csv_parser;

use crate::core::models::course::DEFAULT_CREDITS;
use crate::core::models::Course;
use crate::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use csv_parser::parse_courses_csv;

/// Errors raised while loading a course list
#[derive(Debug, Error)]
pub enum ImportError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON course list
    #[error("invalid JSON course list: {0}")]
    Json(#[from] serde_json::Error),
    /// Malformed TOML course list
    #[error("invalid TOML course list: {0}")]
    Toml(#[from] toml::de::Error),
    /// Malformed curriculum CSV
    #[error("invalid curriculum CSV: {0}")]
    Csv(String),
    /// File extension is not one of `.json`, `.toml`, `.csv`
    #[error("unsupported course list format: '{0}' (expected .json, .toml or .csv)")]
    UnsupportedFormat(String),
}

#[derive(Deserialize)]
struct TomlCourseList {
    #[serde(default, rename = "course")]
    courses: Vec<Course>,
}

/// Load a course list from disk
///
/// # Errors
/// Returns an error if the file cannot be read, its extension is unsupported,
/// or its content does not parse.
pub fn load_courses<P: AsRef<Path>>(path: P) -> Result<Vec<Course>, ImportError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let content = match extension.as_str() {
        "json" | "toml" | "csv" => fs::read_to_string(path)?,
        other => return Err(ImportError::UnsupportedFormat(other.to_string())),
    };

    let courses = match extension.as_str() {
        "json" => parse_courses_json(&content)?,
        "toml" => parse_courses_toml(&content)?,
        _ => parse_courses_csv(&content)?,
    };

    info!("Loaded {} courses from {}", courses.len(), path.display());
    Ok(courses)
}

/// Parse a JSON array of courses
///
/// # Errors
/// Returns an error if the JSON is malformed or a course has no `code`.
pub fn parse_courses_json(content: &str) -> Result<Vec<Course>, ImportError> {
    let courses: Vec<Course> = serde_json::from_str(content)?;
    Ok(with_positive_credits(courses))
}

/// Parse `[[course]]` tables from TOML
///
/// # Errors
/// Returns an error if the TOML is malformed or a course has no `code`.
pub fn parse_courses_toml(content: &str) -> Result<Vec<Course>, ImportError> {
    let list: TomlCourseList = toml::from_str(content)?;
    Ok(with_positive_credits(list.courses))
}

/// Replace zero credits with the default weight
fn with_positive_credits(mut courses: Vec<Course>) -> Vec<Course> {
    for course in courses.iter_mut().filter(|c| c.credits == 0) {
        warn!("{}: zero credit hours, using {DEFAULT_CREDITS}", course.code);
        course.credits = DEFAULT_CREDITS;
    }
    courses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let courses = parse_courses_json(
            r#"[
                {"code": "CS2500", "name": "Fundies 1", "credits": 4},
                {"code": "CS2510", "prerequisites": ["CS2500"], "fixedSemester": 2}
            ]"#,
        )
        .unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].credits, 4);
        assert_eq!(courses[1].credits, DEFAULT_CREDITS);
        assert_eq!(courses[1].fixed_semester, Some(2));
    }

    #[test]
    fn test_parse_json_missing_code() {
        let err = parse_courses_json(r#"[{"name": "No code"}]"#).unwrap_err();
        assert!(matches!(err, ImportError::Json(_)));
    }

    #[test]
    fn test_parse_toml() {
        let courses = parse_courses_toml(
            r#"
[[course]]
code = "MATH1341"
name = "Calculus 1"
credits = 4

[[course]]
code = "MATH1342"
prerequisites = ["MATH1341"]
"#,
        )
        .unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[1].prerequisites, vec!["MATH1341".to_string()]);
        assert_eq!(courses[1].credits, DEFAULT_CREDITS);
    }

    #[test]
    fn test_zero_credits_use_default() {
        let courses = parse_courses_json(r#"[{"code": "CS1200", "credits": 0}]"#).unwrap();
        assert_eq!(courses[0].credits, DEFAULT_CREDITS);

        let courses = parse_courses_toml("[[course]]\ncode = \"CS1200\"\ncredits = 0\n").unwrap();
        assert_eq!(courses[0].credits, DEFAULT_CREDITS);
    }

    #[test]
    fn test_parse_toml_empty() {
        assert!(parse_courses_toml("").unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_courses("courses.xlsx").unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ext) if ext == "xlsx"));
    }
}
