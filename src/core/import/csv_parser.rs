//! CSV parser for curriculum course lists
//!
//! Accepts the curriculum export layout: optional metadata rows, a `Courses`
//! marker row, a header row, then one course per row. Recognized columns:
//! `Course ID`, `Course Name`, `Prefix`, `Number`, `Code`, `Prerequisites`,
//! `Credit Hours`, `Term`. Without a `Courses` marker the first non-empty row
//! is the header.

use crate::core::import::ImportError;
use crate::core::models::course::DEFAULT_CREDITS;
use crate::core::models::Course;
use crate::warn;
use std::collections::HashMap;

/// Parse curriculum CSV content into a course list
///
/// Prerequisites are `;`-separated and may name either a `Course ID` from the
/// same file or a course code (`"CS 2500"` and `"CS2500"` are equivalent).
/// A `Term` value pins the course to that semester.
///
/// # Errors
/// Returns an error if no header row exists or a row has no course code.
pub fn parse_courses_csv(content: &str) -> Result<Vec<Course>, ImportError> {
    let lines: Vec<&str> = content.lines().collect();

    let header_idx = lines
        .iter()
        .position(|line| {
            line.split(',')
                .next()
                .is_some_and(|f| f.trim().eq_ignore_ascii_case("courses"))
        })
        .map_or_else(
            || lines.iter().position(|line| !line.trim().is_empty()),
            |marker| Some(marker + 1),
        )
        .filter(|&idx| idx < lines.len())
        .ok_or_else(|| ImportError::Csv("no course header found".to_string()))?;

    let headers = parse_csv_line(lines[header_idx]);
    let rows = &lines[header_idx + 1..];

    // First pass: create all courses and remember Course ID -> code
    let mut courses: Vec<Course> = Vec::new();
    let mut course_id_to_code: HashMap<String, String> = HashMap::new();

    for (offset, line) in rows.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = header_idx + offset + 2;
        let course = parse_course_line(line, &headers)
            .map_err(|e| ImportError::Csv(format!("line {row}: {e}")))?;
        if let Some(course_id) = get_field(line, "Course ID", &headers) {
            if !course_id.is_empty() {
                course_id_to_code.insert(course_id.to_string(), course.code.clone());
            }
        }
        courses.push(course);
    }

    // Second pass: resolve prerequisites now that every Course ID is known
    let mut course_iter = courses.iter_mut();
    for line in rows.iter().filter(|line| !line.trim().is_empty()) {
        let Some(course) = course_iter.next() else {
            break;
        };
        if let Some(prereq_str) = get_field(line, "Prerequisites", &headers) {
            add_prerequisites_with_mapping(course, prereq_str, &course_id_to_code);
        }
    }

    Ok(courses)
}

/// Parse a CSV line into fields
fn parse_csv_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .map(std::string::ToString::to_string)
        .collect()
}

/// Parse a single course line from the CSV
fn parse_course_line(line: &str, headers: &[String]) -> Result<Course, String> {
    let code = match get_field(line, "Code", headers).filter(|c| !c.is_empty()) {
        Some(code) => normalize_course_code(code),
        None => {
            let prefix = get_field(line, "Prefix", headers).unwrap_or_default();
            let number = get_field(line, "Number", headers).unwrap_or_default();
            if prefix.is_empty() || number.is_empty() {
                return Err("missing course code (Code, or Prefix and Number)".to_string());
            }
            format!("{prefix}{number}")
        }
    };

    let name = get_field(line, "Course Name", headers)
        .unwrap_or_default()
        .to_string();
    let credits = get_field(line, "Credit Hours", headers)
        .map_or(DEFAULT_CREDITS, |value| parse_credits(&code, value));

    let mut course = Course::new(code, name, credits);

    if let Some(term) = get_field(line, "Term", headers).filter(|t| !t.is_empty()) {
        match term.parse::<u8>() {
            Ok(semester) => course.set_fixed_semester(semester),
            Err(_) => warn!("{}: ignoring unreadable term '{term}'", course.code),
        }
    }

    Ok(course)
}

/// Parse a credit value, rounding fractional hours up
///
/// Zero, negative, and unreadable values fall back to the default.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_credits(code: &str, value: &str) -> u32 {
    if value.is_empty() {
        return DEFAULT_CREDITS;
    }
    if let Ok(credits) = value.parse::<u32>() {
        if credits > 0 {
            return credits;
        }
    }
    match value.parse::<f32>() {
        Ok(hours) if hours > 0.0 => hours.ceil() as u32,
        _ => {
            warn!("{code}: unreadable credit hours '{value}', using {DEFAULT_CREDITS}");
            DEFAULT_CREDITS
        }
    }
}

/// Get a field value from a CSV line by header name
fn get_field<'a>(line: &'a str, header_name: &str, headers: &[String]) -> Option<&'a str> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(header_name))
        .and_then(|idx| fields.get(idx))
        .copied()
}

/// Add prerequisites from a semicolon-separated string, converting course IDs to codes
fn add_prerequisites_with_mapping(
    course: &mut Course,
    prereq_str: &str,
    course_id_to_code: &HashMap<String, String>,
) {
    for prereq in prereq_str.split(';') {
        let trimmed = prereq.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(code) = course_id_to_code.get(trimmed) {
            course.add_prerequisite(code.clone());
        } else {
            let normalized = normalize_course_code(trimmed);
            if !normalized.is_empty() {
                course.add_prerequisite(normalized);
            }
        }
    }
}

/// Normalize a course code to PREFIXNUMBER format
/// Handles cases like "CS 1800", "CS1800", "CS 1800 (or coreq)"
fn normalize_course_code(input: &str) -> String {
    let cleaned = input.split('(').next().unwrap_or(input).trim();
    cleaned.split_whitespace().take(2).collect()
}
