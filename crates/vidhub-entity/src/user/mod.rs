//! User domain entities.

pub mod model;
pub mod profile;

pub use model::{CreateUser, OwnerSummary, User};
pub use profile::ChannelProfile;
