//! Custom Axum extractors.

pub mod auth;
pub mod client;
pub mod multipart;
pub mod pagination;
pub mod path;
pub mod rejection;

pub use auth::AuthUser;
pub use client::ClientMeta;
pub use multipart::MultipartForm;
pub use pagination::PaginationParams;
pub use path::parse_id;
pub use rejection::{AppJson, AppPath, AppQuery};
