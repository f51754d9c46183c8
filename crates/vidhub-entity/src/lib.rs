//! # vidhub-entity
//!
//! Domain entity models for VidHub. Every struct in this crate represents a
//! database table row, a joined query projection, or a domain value object.
//! Row types derive `sqlx::FromRow`; everything sent to clients serializes
//! with camelCase field names.

pub mod comment;
pub mod dashboard;
pub mod like;
pub mod playlist;
pub mod session;
pub mod subscription;
pub mod tweet;
pub mod user;
pub mod video;
