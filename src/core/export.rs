//! Semester assignment export and restore
//!
//! A saved roadmap is a flat list of `{ courseCode, semester }` records where
//! semester `0` is the backlog. Records are written as JSON or CSV, chosen by
//! file extension, and can be turned back into an editable [`Schedule`].

use crate::core::models::{Bucket, Course, Schedule, ScheduleError};
use crate::warn;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// One course's saved placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterAssignment {
    /// Course code
    pub course_code: String,
    /// `0` for backlog, `N` for semester N
    pub semester: u8,
}

/// Errors raised while reading or writing assignment files
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Malformed CSV row
    #[error("invalid CSV at line {line}: {message}")]
    Csv {
        /// 1-indexed line number
        line: usize,
        /// What was wrong with the row
        message: String,
    },
    /// File extension is neither `.json` nor `.csv`
    #[error("unsupported assignment file format: '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
}

/// Flatten a schedule into per-course records, front to back
#[must_use]
pub fn assignments(schedule: &Schedule) -> Vec<SemesterAssignment> {
    schedule
        .placements()
        .map(|(bucket, course)| SemesterAssignment {
            course_code: course.code.clone(),
            semester: bucket.semester_number(),
        })
        .collect()
}

/// Rebuild an editable schedule from a course list and saved records
///
/// Courses with no record go to the backlog. Records for courses that are no
/// longer in the list are skipped. When a course has several records, the
/// last one wins. The restored schedule starts clean (not dirty).
///
/// # Errors
/// Returns an error if a record names a semester past `horizon`.
pub fn restore_schedule(
    courses: &[Course],
    records: &[SemesterAssignment],
    horizon: u8,
) -> Result<Schedule, ScheduleError> {
    let mut by_code: HashMap<&str, u8> = HashMap::with_capacity(records.len());
    for record in records {
        if record.semester > horizon {
            return Err(ScheduleError::SemesterOutOfRange {
                semester: record.semester,
                horizon,
            });
        }
        by_code.insert(record.course_code.as_str(), record.semester);
    }

    let mut schedule = Schedule::new(horizon);
    let mut seen: HashSet<&str> = HashSet::with_capacity(courses.len());
    for course in courses {
        if !seen.insert(course.code.as_str()) {
            continue;
        }
        let bucket = by_code
            .get(course.code.as_str())
            .map_or(Bucket::Backlog, |&n| Bucket::from_semester_number(n));
        schedule.push(bucket, course.clone());
    }

    for code in by_code.keys().filter(|code| !seen.contains(*code)) {
        warn!("Saved assignment for {code} has no matching course; skipped");
    }

    Ok(schedule)
}

/// Write assignment records to a `.json` or `.csv` file
///
/// # Errors
/// Returns an error if the extension is unsupported or the file cannot be written.
pub fn write_assignments<P: AsRef<Path>>(
    path: P,
    records: &[SemesterAssignment],
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let content = match extension(path).as_str() {
        "json" => serde_json::to_string_pretty(records)?,
        "csv" => assignments_to_csv(records),
        other => return Err(ExportError::UnsupportedFormat(other.to_string())),
    };
    fs::write(path, content)?;
    Ok(())
}

/// Read assignment records from a `.json` or `.csv` file
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse.
pub fn read_assignments<P: AsRef<Path>>(path: P) -> Result<Vec<SemesterAssignment>, ExportError> {
    let path = path.as_ref();
    match extension(path).as_str() {
        "json" => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        "csv" => assignments_from_csv(&fs::read_to_string(path)?),
        other => Err(ExportError::UnsupportedFormat(other.to_string())),
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn assignments_to_csv(records: &[SemesterAssignment]) -> String {
    let mut out = String::from("Course Code,Semester\n");
    for record in records {
        let _ = writeln!(out, "{},{}", record.course_code, record.semester);
    }
    out
}

fn assignments_from_csv(content: &str) -> Result<Vec<SemesterAssignment>, ExportError> {
    let mut records = Vec::new();

    for (line_no, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let csv_error = |message: String| ExportError::Csv {
            line: line_no + 1,
            message,
        };

        let [code, semester] = fields.as_slice() else {
            return Err(csv_error(format!("expected 2 fields, found {}", fields.len())));
        };
        if code.is_empty() {
            return Err(csv_error("missing course code".to_string()));
        }
        let semester = semester
            .parse::<u8>()
            .map_err(|_| csv_error(format!("invalid semester '{semester}'")))?;

        records.push(SemesterAssignment {
            course_code: (*code).to_string(),
            semester,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduler::schedule;
    use tempfile::TempDir;

    fn course(code: &str, prereqs: &[&str]) -> Course {
        let mut c = Course::new(code.to_string(), String::new(), 3);
        for p in prereqs {
            c.add_prerequisite((*p).to_string());
        }
        c
    }

    fn record(code: &str, semester: u8) -> SemesterAssignment {
        SemesterAssignment {
            course_code: code.to_string(),
            semester,
        }
    }

    #[test]
    fn test_assignments_from_schedule() {
        let mut courses = vec![course("A", &[]), course("B", &["A"]), course("X", &["Y"])];
        courses.push(course("Y", &["X"]));
        let schedule = schedule(&courses);

        assert_eq!(
            assignments(&schedule),
            vec![record("X", 0), record("Y", 0), record("A", 1), record("B", 2)]
        );
    }

    #[test]
    fn test_restore_schedule() {
        let courses = vec![course("A", &[]), course("B", &["A"]), course("C", &[])];
        let records = vec![record("A", 2), record("B", 1), record("GONE", 3)];
        let restored = restore_schedule(&courses, &records, 8).unwrap();

        assert_eq!(restored.bucket_of("A"), Some(Bucket::Semester(2)));
        assert_eq!(restored.bucket_of("B"), Some(Bucket::Semester(1)));
        assert_eq!(restored.bucket_of("C"), Some(Bucket::Backlog));
        assert_eq!(restored.len(), 3);
        assert!(!restored.is_dirty());
    }

    #[test]
    fn test_restore_last_record_wins() {
        let courses = vec![course("A", &[])];
        let records = vec![record("A", 2), record("A", 5)];
        let restored = restore_schedule(&courses, &records, 8).unwrap();
        assert_eq!(restored.bucket_of("A"), Some(Bucket::Semester(5)));
    }

    #[test]
    fn test_restore_rejects_semester_past_horizon() {
        let courses = vec![course("A", &[])];
        let err = restore_schedule(&courses, &[record("A", 9)], 8).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::SemesterOutOfRange {
                semester: 9,
                horizon: 8
            }
        );
    }

    #[test]
    fn test_csv_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.csv");
        let records = vec![record("CS1800", 1), record("CS2510", 0)];

        write_assignments(&path, &records).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Course Code,Semester\n"));
        assert_eq!(read_assignments(&path).unwrap(), records);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        write_assignments(&path, &[record("CS1800", 3)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"courseCode\": \"CS1800\""));
        assert!(content.contains("\"semester\": 3"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let err = write_assignments(dir.path().join("plan.xml"), &[]).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ext) if ext == "xml"));
    }

    #[test]
    fn test_csv_bad_semester() {
        let err = assignments_from_csv("Course Code,Semester\nCS1800,fall\n").unwrap_err();
        assert!(matches!(err, ExportError::Csv { line: 2, .. }));
    }
}
