//! # vidhub-auth
//!
//! Authentication and session lifecycle for VidHub.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `session`: login, refresh rotation with reuse detection, logout

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{ClientInfo, LoginResult, SessionManager, SessionStore};
