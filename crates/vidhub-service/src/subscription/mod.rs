//! Subscription services.

pub mod service;

pub use service::SubscriptionService;
