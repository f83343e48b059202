//! Validate command handler

use super::{load_courses, print_violations};
use nu_roadmap::config::Config;
use nu_roadmap::core::export::{read_assignments, restore_schedule};
use nu_roadmap::core::{validate, Schedule, SchedulerConfig};
use nu_roadmap::verbose;
use std::path::Path;

/// Load a course list and a saved plan into an editable schedule
///
/// # Errors
/// Returns a user-facing message if either file fails to load or the plan
/// names a semester past the configured horizon.
pub fn load_plan(courses: &Path, plan: &Path, config: &Config) -> Result<Schedule, String> {
    let courses = load_courses(courses)?;
    let records = read_assignments(plan)
        .map_err(|e| format!("✗ Failed to load plan {}: {e}", plan.display()))?;
    verbose!("✓ Loaded {} assignments from {}", records.len(), plan.display());

    let horizon = SchedulerConfig::from(config).semesters;
    restore_schedule(&courses, &records, horizon)
        .map_err(|e| format!("✗ Invalid plan {}: {e}", plan.display()))
}

/// Check a saved plan for prerequisite violations
///
/// # Returns
/// `Ok(true)` when the plan is clean, `Ok(false)` when violations were found.
///
/// # Errors
/// Returns a user-facing message if the inputs cannot be loaded.
pub fn run(courses: &Path, plan: &Path, config: &Config) -> Result<bool, String> {
    let schedule = load_plan(courses, plan, config)?;
    print!("{schedule}");

    let violations = validate(&schedule);
    if violations.is_empty() {
        println!("\n✓ No prerequisite violations");
        Ok(true)
    } else {
        print_violations(&violations);
        Ok(false)
    }
}
