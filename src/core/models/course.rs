//! Course model

use serde::{Deserialize, Serialize};

/// Credit weight assumed when an import leaves it out
pub const DEFAULT_CREDITS: u32 = 3;

const fn default_credits() -> u32 {
    DEFAULT_CREDITS
}

/// Represents a course on a student's roadmap
///
/// Field names follow the import hand-off format (`code`, `name`, `credits`,
/// `prerequisites`, `fixedSemester`), so a course list can be deserialized
/// directly from JSON or TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course code, unique within a scheduling run (e.g., "CS2510")
    pub code: String,

    /// Course name (e.g., "Fundamentals of Computer Science 2")
    #[serde(default)]
    pub name: String,
    /// Credit weight (importers replace 0 with the default)
    /// Credit weight
    #[serde(default = "default_credits")]
    pub credits: u32,

    /// Prerequisite course codes. Codes that match nothing in the plan are ignored.
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Semester supplied by an authoritative source (e.g., a transcript)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_semester: Option<u8>,
}

impl Course {
    /// Create a new floating course with no prerequisites
    ///
    /// # Arguments
    /// * `code` - Unique course code
    /// * `name` - Full course name
    /// * `credits` - Credit weight
    #[must_use]
    pub const fn new(code: String, name: String, credits: u32) -> Self {
        Self {
            code,
            name,
            credits,
            prerequisites: Vec::new(),
            fixed_semester: None,
        }
    }

    /// Add a prerequisite by course code
    pub fn add_prerequisite(&mut self, prereq_code: String) {
        if !self.prerequisites.contains(&prereq_code) {
            self.prerequisites.push(prereq_code);
        }
    }

    /// Pin the course to a semester supplied by an external source
    pub fn set_fixed_semester(&mut self, semester: u8) {
        self.fixed_semester = Some(semester);
    }

    /// Whether the course carries an externally supplied semester
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.fixed_semester.is_some()
    }
}
