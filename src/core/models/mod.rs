//! Data models for `NuRoadmap`

pub mod course;
pub mod graph;
pub mod schedule;

pub use course::Course;
pub use graph::CourseGraph;
pub use schedule::{Bucket, Schedule, ScheduleError};
