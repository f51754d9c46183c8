//! Core traits defined in `vidhub-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
