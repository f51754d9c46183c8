//! Route handlers organized by domain.

pub mod comment;
pub mod dashboard;
pub mod health;
pub mod like;
pub mod playlist;
pub mod subscription;
pub mod tweet;
pub mod user;
pub mod video;
