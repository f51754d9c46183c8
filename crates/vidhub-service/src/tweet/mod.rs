//! Tweet services.

pub mod service;

pub use service::TweetService;
