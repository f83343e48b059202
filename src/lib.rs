//! Shared library for `NuRoadmap`
//! Builds semester roadmaps from course lists and checks them against prerequisites

pub mod config;
pub mod core;
pub mod logger;

pub use core::get_version;
