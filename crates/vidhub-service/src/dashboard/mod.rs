//! Channel dashboard services.

pub mod service;

pub use service::DashboardService;
