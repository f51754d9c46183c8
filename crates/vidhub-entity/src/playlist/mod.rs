//! Playlist domain entities.

pub mod model;

pub use model::{Playlist, PlaylistDetail, PlaylistSummary};
