//! # vidhub-service
//!
//! Business logic service layer for VidHub. Each service orchestrates
//! repositories, media storage, and authentication to implement one
//! domain's use cases, including the existence-then-ownership checks.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod comment;
pub mod context;
pub mod dashboard;
pub mod health;
pub mod like;
pub mod playlist;
pub mod subscription;
pub mod tweet;
pub mod upload;
pub mod user;
pub mod validation;
pub mod video;

pub use comment::CommentService;
pub use context::RequestContext;
pub use dashboard::DashboardService;
pub use health::{HealthReport, HealthService};
pub use like::{LikeService, LikedVideos};
pub use playlist::PlaylistService;
pub use subscription::SubscriptionService;
pub use tweet::TweetService;
pub use upload::UploadedFile;
pub use user::{RegisterInput, UserService};
pub use video::{PublishVideoInput, UpdateVideoInput, VideoListQuery, VideoService};
