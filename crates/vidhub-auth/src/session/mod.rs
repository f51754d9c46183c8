//! Session lifecycle: login, refresh rotation, logout, validation.

pub mod manager;
pub mod store;

pub use manager::{ClientInfo, LoginResult, SessionManager};
pub use store::SessionStore;
