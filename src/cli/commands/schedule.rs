//! Schedule command handler

use super::{load_courses, print_violations};
use nu_roadmap::config::Config;
use nu_roadmap::core::export::{assignments, write_assignments};
use nu_roadmap::core::scheduler::RoadmapScheduler;
use nu_roadmap::core::{validate, SchedulerConfig};
use nu_roadmap::{info, verbose};
use std::path::{Path, PathBuf};

/// Build and print a roadmap for one course list, optionally saving it
///
/// # Arguments
/// * `input_file` - Course list (.json, .toml or .csv)
/// * `output` - Explicit assignment file to write
/// * `save` - Write assignments to the configured `out_dir` when no `output` is given
/// * `config` - Configuration with scheduler settings and output directory
///
/// # Errors
/// Returns a user-facing message if loading or saving fails.
pub fn run(
    input_file: &Path,
    output: Option<&Path>,
    save: bool,
    config: &Config,
) -> Result<(), String> {
    let courses = load_courses(input_file)?;
    verbose!("✓ Loaded {} courses from {}", courses.len(), input_file.display());

    let scheduler = RoadmapScheduler::new(SchedulerConfig::from(config));
    let schedule = scheduler.schedule(&courses);
    print!("{schedule}");

    if !schedule.cycle_affected().is_empty() {
        println!(
            "\n⚠ Prerequisite cycle: {} could not be ordered and were left in the backlog",
            schedule.cycle_affected().join(", ")
        );
    }

    // Fixed placements are taken as given, so they can still break ordering
    let violations = validate(&schedule);
    if !violations.is_empty() {
        print_violations(&violations);
    }

    let target: Option<PathBuf> = match output {
        Some(path) => Some(path.to_path_buf()),
        None if save => Some(default_output_path(input_file, config)?),
        None => None,
    };

    if let Some(path) = target {
        write_assignments(&path, &assignments(&schedule))
            .map_err(|e| format!("✗ Failed to save roadmap to {}: {e}", path.display()))?;
        println!("\n✓ Roadmap saved to: {}", path.display());
        info!("Saved {} assignments to {}", schedule.len(), path.display());
    }

    Ok(())
}

/// `<out_dir>/<input stem>_roadmap.json`, creating `out_dir` if needed
fn default_output_path(input_file: &Path, config: &Config) -> Result<PathBuf, String> {
    let out_dir = PathBuf::from(&config.paths.out_dir);
    std::fs::create_dir_all(&out_dir).map_err(|e| {
        format!(
            "✗ Failed to create output directory {}: {e}",
            out_dir.display()
        )
    })?;

    let stem = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("courses");
    Ok(out_dir.join(format!("{stem}_roadmap.json")))
}
