//! Media upload manager.
//!
//! Validates uploaded avatars, cover images, thumbnails and video files,
//! stores them under `{kind}/{uuid}.{ext}`, and translates between stored
//! paths and the public URLs saved on users and videos.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use vidhub_core::config::StorageConfig;
use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_core::traits::storage::StorageProvider;

/// Image MIME types accepted for avatars, cover images and thumbnails.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Video MIME types accepted for video files.
const VIDEO_TYPES: &[(&str, &str)] = &[
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("video/quicktime", "mov"),
];

/// Kind of uploaded media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Avatar,
    CoverImage,
    Thumbnail,
    Video,
}

impl MediaKind {
    /// Directory the kind is stored under.
    pub fn directory(&self) -> &'static str {
        match self {
            Self::Avatar => "avatars",
            Self::CoverImage => "covers",
            Self::Thumbnail => "thumbnails",
            Self::Video => "videos",
        }
    }

    /// Whether the kind is an image.
    pub fn is_image(&self) -> bool {
        !matches!(self, Self::Video)
    }

    /// File extension for an accepted MIME type, or `None` when the type is
    /// not allowed for this kind. Stored media is served with the MIME type
    /// of its extension, so the client's file name is never consulted.
    pub fn extension_for(&self, content_type: &str) -> Option<&'static str> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let allowed = if self.is_image() {
            IMAGE_TYPES
        } else {
            VIDEO_TYPES
        };
        allowed
            .iter()
            .find(|(allowed_mime, _)| *allowed_mime == mime)
            .map(|(_, ext)| *ext)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Avatar => "avatar",
            Self::CoverImage => "cover image",
            Self::Thumbnail => "thumbnail",
            Self::Video => "video file",
        })
    }
}

/// A successfully stored media object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Path relative to the storage root.
    pub path: String,
    /// Public URL the object is served under.
    pub url: String,
    /// Stored size in bytes.
    pub size_bytes: u64,
}

/// Validates and stores uploaded media through a [`StorageProvider`].
#[derive(Debug, Clone)]
pub struct MediaManager {
    provider: Arc<dyn StorageProvider>,
    public_base_url: String,
    max_image_bytes: u64,
    max_video_bytes: u64,
}

impl MediaManager {
    /// Create a media manager over a provider.
    pub fn new(provider: Arc<dyn StorageProvider>, config: &StorageConfig) -> Self {
        Self {
            provider,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            max_image_bytes: config.max_image_bytes,
            max_video_bytes: config.max_video_bytes,
        }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    /// Validate and store an upload.
    pub async fn upload(
        &self,
        kind: MediaKind,
        original_name: Option<&str>,
        content_type: Option<&str>,
        data: Bytes,
    ) -> AppResult<StoredMedia> {
        let content_type = content_type.unwrap_or_default();
        let Some(extension) = kind.extension_for(content_type) else {
            return Err(AppError::validation(format!(
                "Unsupported {kind} type: {}",
                if content_type.is_empty() { "unknown" } else { content_type }
            )));
        };

        let size_bytes = data.len() as u64;
        if size_bytes == 0 {
            return Err(AppError::validation(format!("Uploaded {kind} is empty")));
        }
        let limit = if kind.is_image() {
            self.max_image_bytes
        } else {
            self.max_video_bytes
        };
        if size_bytes > limit {
            return Err(AppError::validation(format!(
                "Uploaded {kind} exceeds the {limit} byte limit"
            )));
        }

        let path = format!("{}/{}.{extension}", kind.directory(), Uuid::new_v4());
        self.provider.write(&path, data).await?;

        let url = self.url_for(&path);
        info!(
            kind = %kind,
            path = %path,
            original_name = original_name.unwrap_or_default(),
            size_bytes,
            "Stored media"
        );
        Ok(StoredMedia {
            path,
            url,
            size_bytes,
        })
    }

    /// Public URL for a stored path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path.trim_start_matches('/'))
    }

    /// Map a public URL back to a stored path. Foreign URLs yield `None`.
    pub fn path_for_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.public_base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }

    /// Delete the object behind a public URL.
    ///
    /// Returns whether something was deleted. Foreign URLs and missing
    /// objects are not errors.
    pub async fn delete_by_url(&self, url: &str) -> AppResult<bool> {
        let Some(path) = self.path_for_url(url) else {
            return Ok(false);
        };
        match self.provider.delete(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Delete the object behind a public URL, logging instead of failing.
    pub async fn delete_quietly(&self, url: &str) {
        if let Err(e) = self.delete_by_url(url).await {
            warn!(url, error = %e, "Failed to delete media");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalStorageProvider;

    async fn manager() -> (tempfile::TempDir, MediaManager) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let config = StorageConfig {
            root_path: dir.path().to_string_lossy().to_string(),
            public_base_url: "/media/".to_string(),
            max_image_bytes: 16,
            max_video_bytes: 64,
        };
        (dir, MediaManager::new(Arc::new(provider), &config))
    }

    #[test]
    fn test_kind_accepts_allowed_types() {
        assert!(MediaKind::Avatar.extension_for("image/png").is_some());
        assert!(MediaKind::Thumbnail.extension_for("IMAGE/JPEG").is_some());
        assert_eq!(MediaKind::Avatar.extension_for("video/mp4"), None);
        assert!(MediaKind::Video.extension_for("video/mp4").is_some());
        assert_eq!(MediaKind::Video.extension_for("image/"), None);
        assert_eq!(MediaKind::CoverImage.extension_for(""), None);
        assert_eq!(MediaKind::Avatar.extension_for("image/svg+xml"), None);
        assert_eq!(MediaKind::Avatar.extension_for("text/html"), None);
        assert_eq!(MediaKind::Video.extension_for("video/x-m$v"), None);
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(MediaKind::Avatar.extension_for("image/png"), Some("png"));
        assert_eq!(
            MediaKind::CoverImage.extension_for("image/jpeg; charset=binary"),
            Some("jpg")
        );
        assert_eq!(MediaKind::Video.extension_for("video/quicktime"), Some("mov"));
        assert_eq!(MediaKind::Thumbnail.extension_for("video/mp4"), None);
    }

    #[tokio::test]
    async fn test_upload_ignores_client_extension() {
        let (_dir, media) = manager().await;

        let stored = media
            .upload(
                MediaKind::Avatar,
                Some("evil.html"),
                Some("image/png"),
                Bytes::from_static(b"<script>"),
            )
            .await
            .unwrap();
        assert!(stored.path.starts_with("avatars/"));
        assert!(stored.path.ends_with(".png"));

        let err = media
            .upload(
                MediaKind::Avatar,
                Some("logo.svg"),
                Some("image/svg+xml"),
                Bytes::from_static(b"<svg/>"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_upload_and_delete_by_url() {
        let (_dir, media) = manager().await;

        let stored = media
            .upload(
                MediaKind::Avatar,
                Some("face.png"),
                Some("image/png"),
                Bytes::from_static(b"png-bytes"),
            )
            .await
            .unwrap();

        assert!(stored.path.starts_with("avatars/"));
        assert!(stored.path.ends_with(".png"));
        assert_eq!(stored.url, format!("/media/{}", stored.path));
        assert_eq!(stored.size_bytes, 9);
        assert!(media.provider().exists(&stored.path).await.unwrap());

        assert!(media.delete_by_url(&stored.url).await.unwrap());
        assert!(!media.provider().exists(&stored.path).await.unwrap());
        assert!(!media.delete_by_url(&stored.url).await.unwrap());
    }

    #[tokio::test]
    async fn test_upload_rejects_wrong_type_and_size() {
        let (_dir, media) = manager().await;

        let err = media
            .upload(
                MediaKind::Thumbnail,
                Some("clip.mp4"),
                Some("video/mp4"),
                Bytes::from_static(b"data"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = media
            .upload(
                MediaKind::Avatar,
                Some("big.png"),
                Some("image/png"),
                Bytes::from(vec![0u8; 17]),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = media
            .upload(MediaKind::Video, None, Some("video/mp4"), Bytes::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_foreign_url_is_ignored() {
        let (_dir, media) = manager().await;
        assert_eq!(media.path_for_url("https://cdn.example.com/a.png"), None);
        assert!(
            !media
                .delete_by_url("https://cdn.example.com/a.png")
                .await
                .unwrap()
        );
    }
}
