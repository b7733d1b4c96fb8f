//! Observability setup for JobStar binaries.

pub mod tracing_setup;
