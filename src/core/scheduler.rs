//! Roadmap scheduler for distributing courses across semesters
//!
//! Two modes, picked from the input:
//! 1. Fixed placement: if any course carries a fixed semester, fixed courses go
//!    straight to that semester and everything else goes to the backlog.
//! 2. Topological: otherwise, courses are released level by level in
//!    prerequisite order (Kahn's algorithm). Each level is packed largest-first
//!    into the current semester up to the credit cap; what does not fit waits
//!    for the next semester. Courses left after the horizon, and courses caught
//!    in prerequisite cycles, land in the backlog.

use crate::core::models::{Bucket, Course, CourseGraph, Schedule};
use crate::{debug, info, warn};
use std::cmp::Reverse;

/// Maximum credits the scheduler places in one semester
pub const MAX_CREDITS_PER_SEMESTER: u32 = 24;

/// Number of semesters in a standard 4-year plan
pub const SEMESTER_HORIZON: u8 = 8;

/// Configuration for the roadmap scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Credit cap per semester (a single larger course is still placed alone)
    pub max_credits: u32,
    /// Number of semester buckets
    pub semesters: u8,
}

impl SchedulerConfig {
    /// Create a config with a custom cap and horizon
    #[must_use]
    pub const fn new(max_credits: u32, semesters: u8) -> Self {
        Self {
            max_credits,
            semesters,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(MAX_CREDITS_PER_SEMESTER, SEMESTER_HORIZON)
    }
}

/// Scheduler that turns a course list into a semester roadmap
#[derive(Debug, Clone, Copy, Default)]
pub struct RoadmapScheduler {
    config: SchedulerConfig,
}

impl RoadmapScheduler {
    /// Create a new roadmap scheduler
    #[must_use]
    pub const fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// The scheduler's configuration
    #[must_use]
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedule courses into semesters
    ///
    /// Every distinct course code in `courses` ends up in exactly one bucket.
    #[must_use]
    pub fn schedule(&self, courses: &[Course]) -> Schedule {
        let graph = CourseGraph::build(courses);
        let mut schedule = Schedule::new(self.config.semesters);

        if graph.courses().iter().any(|c| c.is_fixed()) {
            info!(
                "Fixed-placement mode: {} courses, {} with a fixed semester",
                graph.course_count(),
                graph.courses().iter().filter(|c| c.is_fixed()).count()
            );
            self.place_fixed(&graph, &mut schedule);
        } else if graph.course_count() > 0 {
            info!(
                "Topological mode: {} courses, {} prerequisite edges",
                graph.course_count(),
                graph.edge_count()
            );
            self.place_topological(&graph, &mut schedule);
        }

        schedule
    }

    /// Honor externally supplied semesters without any dependency checks
    fn place_fixed(&self, graph: &CourseGraph<'_>, schedule: &mut Schedule) {
        for course in graph.courses() {
            let bucket = match course.fixed_semester {
                Some(n) if n >= 1 && n <= self.config.semesters => Bucket::Semester(n),
                Some(n) => {
                    warn!(
                        "{} has fixed semester {n} outside 1..={}; placing in backlog",
                        course.code, self.config.semesters
                    );
                    Bucket::Backlog
                }
                None => Bucket::Backlog,
            };
            schedule.push(bucket, (*course).clone());
        }
    }

    /// Level-by-level Kahn's schedule with greedy largest-first packing
    fn place_topological(&self, graph: &CourseGraph<'_>, schedule: &mut Schedule) {
        let mut in_degree = graph.in_degrees().to_vec();
        let mut placed = vec![false; graph.course_count()];
        let mut pool: Vec<usize> = (0..in_degree.len()).filter(|&i| in_degree[i] == 0).collect();

        for semester in 1..=self.config.semesters {
            if pool.is_empty() {
                break;
            }
            // Largest first; arena index keeps input order among equal credits
            pool.sort_by_key(|&idx| (Reverse(graph.course(idx).credits), idx));

            let (load, overflow) = self.pack(graph, &pool);
            debug!(
                "semester-{semester}: {} courses, {} credits, {} deferred",
                load.len(),
                load.iter()
                    .fold(0u32, |total, &i| total.saturating_add(graph.course(i).credits)),
                overflow.len()
            );

            let mut next = overflow;
            for &idx in &load {
                placed[idx] = true;
                schedule.push(Bucket::Semester(semester), graph.course(idx).clone());
                for &dep in graph.dependents(idx) {
                    in_degree[dep] -= 1;
                    if in_degree[dep] == 0 {
                        next.push(dep);
                    }
                }
            }

            pool = next;
        }

        if !pool.is_empty() {
            pool.sort_by_key(|&idx| (Reverse(graph.course(idx).credits), idx));
            warn!(
                "{} courses did not fit in {} semesters; moved to backlog",
                pool.len(),
                self.config.semesters
            );
            for &idx in &pool {
                placed[idx] = true;
                schedule.push(Bucket::Backlog, graph.course(idx).clone());
            }
        }

        let unorderable = graph.unorderable();
        if !unorderable.is_empty() {
            let codes: Vec<String> = unorderable
                .iter()
                .map(|&i| graph.course(i).code.clone())
                .collect();
            warn!(
                "Prerequisite cycle blocks {}; moved to backlog",
                codes.join(", ")
            );
            schedule.set_cycle_affected(codes);
        }

        // Locked behind the horizon cut or behind a cycle
        for idx in (0..placed.len()).filter(|&i| !placed[i]) {
            schedule.push(Bucket::Backlog, graph.course(idx).clone());
        }
    }

    /// Split a sorted candidate pool into this semester's load and the overflow
    ///
    /// First fit against the credit cap. A lone course above the cap is still
    /// placed so the schedule always makes progress.
    fn pack(&self, graph: &CourseGraph<'_>, pool: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let mut load = Vec::new();
        let mut overflow = Vec::new();
        let mut running: u32 = 0;

        for &idx in pool {
            let credits = graph.course(idx).credits;
            let candidate = running.saturating_add(credits);
            if load.is_empty() || candidate <= self.config.max_credits {
                running = candidate;
                load.push(idx);
            } else {
                overflow.push(idx);
            }
        }

        (load, overflow)
    }
}

/// Schedule courses with the default 24-credit cap and 8-semester horizon
#[must_use]
pub fn schedule(courses: &[Course]) -> Schedule {
    RoadmapScheduler::default().schedule(courses)
}
