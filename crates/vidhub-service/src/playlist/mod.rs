//! Playlist services.

pub mod service;

pub use service::PlaylistService;
