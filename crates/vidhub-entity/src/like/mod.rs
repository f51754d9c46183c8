//! Like domain entities.

pub mod model;

pub use model::{Like, LikeTarget};
