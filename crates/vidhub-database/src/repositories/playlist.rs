//! Playlist repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use vidhub_core::error::{AppError, ErrorKind};
use vidhub_core::result::AppResult;
use vidhub_entity::playlist::{Playlist, PlaylistSummary};
use vidhub_entity::video::VideoWithOwner;

use super::OWNER_COLUMNS;

/// Summary columns for a query over `playlists p`.
const SUMMARY_COLUMNS: &str = "p.*, \
    (SELECT COUNT(*) FROM playlist_videos pv WHERE pv.playlist_id = p.id) AS total_videos, \
    (SELECT COALESCE(SUM(v.views), 0)::BIGINT FROM playlist_videos pv \
     JOIN videos v ON v.id = pv.video_id WHERE pv.playlist_id = p.id) AS total_views";

/// Repository for playlists and their entries.
#[derive(Debug, Clone)]
pub struct PlaylistRepository {
    pool: PgPool,
}

impl PlaylistRepository {
    /// Create a new playlist repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a playlist by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Playlist>> {
        sqlx::query_as::<_, Playlist>("SELECT * FROM playlists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find playlist", e))
    }

    /// Find a playlist with its totals.
    pub async fn find_summary(&self, id: Uuid) -> AppResult<Option<PlaylistSummary>> {
        sqlx::query_as::<_, PlaylistSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM playlists p WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load playlist", e))
    }

    /// A user's playlists with totals, newest first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<PlaylistSummary>> {
        sqlx::query_as::<_, PlaylistSummary>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM playlists p \
             WHERE p.owner_id = $1 ORDER BY p.created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list playlists", e))
    }

    /// The playlist's videos in insertion order, hiding other channels'
    /// unpublished videos from `viewer_id`.
    pub async fn videos(&self, playlist_id: Uuid, viewer_id: Uuid) -> AppResult<Vec<VideoWithOwner>> {
        sqlx::query_as::<_, VideoWithOwner>(&format!(
            "SELECT v.*, {OWNER_COLUMNS} \
             FROM playlist_videos pv \
             JOIN videos v ON v.id = pv.video_id \
             JOIN users u ON u.id = v.owner_id \
             WHERE pv.playlist_id = $1 AND (v.is_published OR v.owner_id = $2) \
             ORDER BY pv.position"
        ))
        .bind(playlist_id)
        .bind(viewer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load playlist videos", e))
    }

    /// Create a new playlist.
    pub async fn create(&self, owner_id: Uuid, name: &str, description: &str) -> AppResult<Playlist> {
        sqlx::query_as::<_, Playlist>(
            "INSERT INTO playlists (id, owner_id, name, description) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create playlist", e))
    }

    /// Replace name and description.
    pub async fn update(&self, id: Uuid, name: &str, description: &str) -> AppResult<Playlist> {
        sqlx::query_as::<_, Playlist>(
            "UPDATE playlists SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update playlist", e))?
        .ok_or_else(|| AppError::not_found("Playlist not found"))
    }

    /// Append a video. Returns `false` if it was already in the playlist.
    pub async fn add_video(&self, playlist_id: Uuid, video_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO playlist_videos (playlist_id, video_id) VALUES ($1, $2) \
             ON CONFLICT (playlist_id, video_id) DO NOTHING",
        )
        .bind(playlist_id)
        .bind(video_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add video to playlist", e))?;

        if result.rows_affected() > 0 {
            self.touch(playlist_id).await?;
        }
        Ok(result.rows_affected() > 0)
    }

    /// Remove a video. Returns `false` if it was not in the playlist.
    pub async fn remove_video(&self, playlist_id: Uuid, video_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2")
                .bind(playlist_id)
                .bind(video_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to remove video from playlist",
                        e,
                    )
                })?;

        if result.rows_affected() > 0 {
            self.touch(playlist_id).await?;
        }
        Ok(result.rows_affected() > 0)
    }

    /// Delete a playlist and its entries.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete playlist", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn touch(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE playlists SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch playlist", e))?;
        Ok(())
    }
}
