//! Health reporting.

pub mod service;

pub use service::{HealthReport, HealthService};
