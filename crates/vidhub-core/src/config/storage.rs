//! Media storage configuration.

use serde::{Deserialize, Serialize};

/// Local media storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded media is written to.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Public URL prefix the storage root is served under.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum size of avatars, cover images and thumbnails.
    #[serde(default = "default_max_image")]
    pub max_image_bytes: u64,
    /// Maximum size of video files.
    #[serde(default = "default_max_video")]
    pub max_video_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            public_base_url: default_public_base_url(),
            max_image_bytes: default_max_image(),
            max_video_bytes: default_max_video(),
        }
    }
}

fn default_root_path() -> String {
    "./data/media".to_string()
}

fn default_public_base_url() -> String {
    "/media".to_string()
}

fn default_max_image() -> u64 {
    5 * 1024 * 1024
}

fn default_max_video() -> u64 {
    500 * 1024 * 1024
}
