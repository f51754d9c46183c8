//! User account and channel services.

pub mod service;

pub use service::{RegisterInput, UserService};
