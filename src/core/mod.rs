//! Core module for roadmap scheduling and validation

pub mod export;
pub mod import;
pub mod models;
pub mod scheduler;
pub mod validator;

pub use models::{Bucket, Course, CourseGraph, Schedule, ScheduleError};
pub use scheduler::{schedule, SchedulerConfig};
pub use validator::{validate, Violation};

/// Returns the current version of the `NuRoadmap` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
