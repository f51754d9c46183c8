//! Uploaded file handed from the HTTP layer to services.

use bytes::Bytes;

use vidhub_core::result::AppResult;
use vidhub_storage::{MediaKind, MediaManager, StoredMedia};

/// A file received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name.
    pub file_name: Option<String>,
    /// Client-supplied MIME type.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl UploadedFile {
    /// Validate and store the file as the given media kind.
    pub async fn store(self, media: &MediaManager, kind: MediaKind) -> AppResult<StoredMedia> {
        media
            .upload(
                kind,
                self.file_name.as_deref(),
                self.content_type.as_deref(),
                self.data,
            )
            .await
    }
}
