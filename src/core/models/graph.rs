//! Prerequisite graph for a single scheduling run

use crate::core::models::Course;
use crate::warn;
use std::collections::HashMap;

/// Prerequisite graph built from a flat course list
///
/// Courses live in an indexed arena; edges are index pairs. The graph keeps two
/// views of the same edges:
/// - `dependents`: for each course, the courses that list it as a prerequisite
/// - `in_degree`: for each course, how many of its prerequisites are in the plan
///
/// Prerequisite codes that match no course in the plan are dropped at build
/// time. The graph is not checked for cycles; the scheduler handles them.
#[derive(Debug, Clone)]
pub struct CourseGraph<'a> {
    courses: Vec<&'a Course>,
    index: HashMap<&'a str, usize>,
    dependents: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
}

impl<'a> CourseGraph<'a> {
    /// Build the graph for a course list
    ///
    /// A code that appears more than once keeps its first occurrence; later
    /// duplicates are skipped with a warning.
    #[must_use]
    pub fn build(courses: &'a [Course]) -> Self {
        let mut nodes: Vec<&'a Course> = Vec::with_capacity(courses.len());
        let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(courses.len());

        for course in courses {
            if index.contains_key(course.code.as_str()) {
                warn!("Duplicate course code {} ignored", course.code);
                continue;
            }
            index.insert(course.code.as_str(), nodes.len());
            nodes.push(course);
        }

        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut in_degree: Vec<usize> = vec![0; nodes.len()];

        for (idx, course) in nodes.iter().enumerate() {
            for prereq in &course.prerequisites {
                let Some(&prereq_idx) = index.get(prereq.as_str()) else {
                    continue;
                };
                if dependents[prereq_idx].contains(&idx) {
                    continue;
                }
                dependents[prereq_idx].push(idx);
                in_degree[idx] += 1;
            }
        }

        Self {
            courses: nodes,
            index,
            dependents,
            in_degree,
        }
    }

    /// Number of distinct courses in the graph
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of resolved prerequisite edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependents.iter().map(Vec::len).sum()
    }

    /// Course stored at an arena index
    #[must_use]
    pub fn course(&self, idx: usize) -> &'a Course {
        self.courses[idx]
    }

    /// All courses in arena (input) order
    #[must_use]
    pub fn courses(&self) -> &[&'a Course] {
        &self.courses
    }

    /// Arena index for a course code
    #[must_use]
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    /// Courses that list `idx` as a prerequisite
    #[must_use]
    pub fn dependents(&self, idx: usize) -> &[usize] {
        &self.dependents[idx]
    }

    /// Count of in-plan prerequisites for every course, by arena index
    #[must_use]
    pub fn in_degrees(&self) -> &[usize] {
        &self.in_degree
    }

    /// Courses that can never be ordered: members of a prerequisite cycle and
    /// everything downstream of one. Returned as arena indices in input order.
    #[must_use]
    pub fn unorderable(&self) -> Vec<usize> {
        let mut in_degree = self.in_degree.clone();
        let mut queue: Vec<usize> = (0..in_degree.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut reached = vec![false; in_degree.len()];

        while let Some(idx) = queue.pop() {
            reached[idx] = true;
            for &dep in &self.dependents[idx] {
                in_degree[dep] -= 1;
                if in_degree[dep] == 0 {
                    queue.push(dep);
                }
            }
        }

        (0..reached.len()).filter(|&i| !reached[i]).collect()
    }
}

impl std::fmt::Display for CourseGraph<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prerequisite graph ({} courses):", self.courses.len())?;
        writeln!(f)?;

        for (idx, course) in self.courses.iter().enumerate() {
            let unlocks: Vec<&str> = self.dependents[idx]
                .iter()
                .map(|&d| self.courses[d].code.as_str())
                .collect();
            if unlocks.is_empty() {
                writeln!(f, "  {} → (no dependents)", course.code)?;
            } else {
                writeln!(f, "  {} → {}", course.code, unlocks.join(", "))?;
            }
        }

        Ok(())
    }
}
