//! # vidhub-core
//!
//! Core crate for VidHub. Contains configuration schemas, the unified
//! error system, pagination/sorting types, and the storage provider trait.
//!
//! This crate has **no** internal dependencies on other VidHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
