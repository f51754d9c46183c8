//! Video services.

pub mod service;

pub use service::{PublishVideoInput, UpdateVideoInput, VideoListQuery, VideoService};
