//! Video domain entities.

pub mod model;
pub mod view;

pub use model::{CreateVideo, UpdateVideo, Video};
pub use view::{ChannelVideo, LikedVideo, VideoDetail, VideoWithOwner, WatchHistoryEntry};
