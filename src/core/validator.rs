//! Prerequisite ordering checks for a roadmap
//!
//! Works on any schedule, generated or hand-edited. A scheduled course is
//! in violation for each in-plan prerequisite that is not in a strictly
//! earlier semester; a prerequisite left in the backlog counts as not earlier.
//! Backlog courses never violate, and prerequisites that are not on the
//! roadmap at all are ignored.

use crate::core::models::Schedule;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A course scheduled no later than one of its prerequisites
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Code of the dependent course
    pub course_code: String,
    /// Code of the prerequisite that is not strictly earlier
    pub prerequisite_code: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is scheduled before its prerequisite {} is completed",
            self.course_code, self.prerequisite_code
        )
    }
}

/// Find every prerequisite ordering violation in a schedule
///
/// One entry per (course, prerequisite) pair; nothing is collapsed. The result
/// follows the schedule's bucket order, then each course's prerequisite order.
#[must_use]
pub fn validate(schedule: &Schedule) -> Vec<Violation> {
    let mut bucket_index: HashMap<&str, i32> = HashMap::with_capacity(schedule.len());
    for (bucket, course) in schedule.placements() {
        bucket_index
            .entry(course.code.as_str())
            .or_insert_with(|| bucket.index());
    }

    let mut violations = Vec::new();
    for (bucket, course) in schedule.placements() {
        let end_idx = bucket.index();
        if end_idx == -1 {
            continue;
        }

        for prereq in &course.prerequisites {
            let Some(&prereq_idx) = bucket_index.get(prereq.as_str()) else {
                continue;
            };
            if prereq_idx == -1 || prereq_idx >= end_idx {
                violations.push(Violation {
                    course_code: course.code.clone(),
                    prerequisite_code: prereq.clone(),
                });
            }
        }
    }

    violations
}
