//! Move command handler

use super::print_violations;
use super::validate::load_plan;
use nu_roadmap::config::Config;
use nu_roadmap::core::export::{assignments, write_assignments};
use nu_roadmap::core::{validate, Bucket};
use nu_roadmap::{info, warn};
use std::path::Path;

/// Arguments for a single move
pub struct MoveRequest<'a> {
    /// Course list
    pub courses: &'a Path,
    /// Saved plan to edit
    pub plan: &'a Path,
    /// Course code to move
    pub course: &'a str,
    /// Destination bucket
    pub to: &'a str,
    /// Expected source bucket
    pub from: Option<&'a str>,
    /// Save even with violations
    pub force: bool,
    /// Where to write the result (defaults to `plan`)
    pub output: Option<&'a Path>,
}

/// Move one course in a saved plan, validate, and save
///
/// # Returns
/// `Ok(true)` when the edited plan was saved, `Ok(false)` when it was left
/// unsaved because of violations.
///
/// # Errors
/// Returns a user-facing message if inputs fail to load, a bucket name does
/// not parse, the move is impossible, or the plan cannot be written.
pub fn run(request: &MoveRequest<'_>, config: &Config) -> Result<bool, String> {
    let mut schedule = load_plan(request.courses, request.plan, config)?;

    let to: Bucket = request.to.parse().map_err(|e| format!("✗ {e}"))?;
    let from = match request.from {
        Some(from) => {
            let from: Bucket = from.parse().map_err(|e| format!("✗ {e}"))?;
            schedule
                .move_course(request.course, from, to)
                .map_err(|e| format!("✗ {e}"))?;
            from
        }
        None => schedule
            .move_to(request.course, to)
            .map_err(|e| format!("✗ {e}"))?,
    };
    println!("✓ Moved {} from {from} to {to}", request.course);

    let violations = validate(&schedule);
    if !violations.is_empty() {
        print_violations(&violations);
        if !request.force {
            println!("\n✗ Plan not saved; rerun with --force to save anyway");
            return Ok(false);
        }
        warn!(
            "Saving {} with {} prerequisite violation(s)",
            request.plan.display(),
            violations.len()
        );
    }

    let target = request.output.unwrap_or(request.plan);
    if schedule.is_dirty() {
        write_assignments(target, &assignments(&schedule))
            .map_err(|e| format!("✗ Failed to save plan to {}: {e}", target.display()))?;
        schedule.mark_saved();
        info!("Saved edited plan to {}", target.display());
    }
    println!("✓ Plan saved to: {}", target.display());
    Ok(true)
}
