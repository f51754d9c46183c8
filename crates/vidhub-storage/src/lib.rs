//! # vidhub-storage
//!
//! Media storage for VidHub: a local filesystem [`StorageProvider`]
//! implementation and the [`MediaManager`] that validates uploads, names
//! stored objects, and maps them to public URLs.
//!
//! [`StorageProvider`]: vidhub_core::traits::StorageProvider

pub mod local;
pub mod media;

pub use local::LocalStorageProvider;
pub use media::{MediaKind, MediaManager, StoredMedia};
