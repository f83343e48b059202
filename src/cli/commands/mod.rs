//! CLI command handlers for `NuRoadmap`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod move_course;
pub mod schedule;
pub mod validate;

use nu_roadmap::core::{import, Course, Violation};
use nu_roadmap::error;
use std::path::Path;

/// Load a course list, turning failures into a user-facing message
fn load_courses(path: &Path) -> Result<Vec<Course>, String> {
    import::load_courses(path).map_err(|e| {
        error!("Failed to load courses {}: {e}", path.display());
        format!("✗ Failed to load {}: {e}", path.display())
    })
}

/// Print violations as a bulleted list
fn print_violations(violations: &[Violation]) {
    println!("\n✗ {} prerequisite violation(s):", violations.len());
    for violation in violations {
        println!("  - {violation}");
    }
}
