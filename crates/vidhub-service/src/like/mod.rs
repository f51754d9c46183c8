//! Like services.

pub mod service;

pub use service::{LikeService, LikedVideos};
