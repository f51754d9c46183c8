//! Tweet domain entities.

pub mod model;

pub use model::{Tweet, TweetView};
