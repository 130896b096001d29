//! Performance review scoring and management.
//!
//! The [`workflows::review::scoring`] module holds the weighted scoring engine;
//! the rest of the crate wraps it with employee records, review intake, HR
//! decisions, dashboards and an HTTP router.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
