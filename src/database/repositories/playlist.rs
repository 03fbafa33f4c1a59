//! Playlist repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::playlist::{PlaylistItem, PlaylistProvider};
use crate::utils::errors::StageCrewError;

const PLAYLIST_COLUMNS: &str =
    "id, event_id, title, artist, url, provider, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PlaylistRepository {
    pool: PgPool,
}

impl PlaylistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        event_id: Uuid,
        title: &str,
        artist: &str,
        url: &str,
        provider: PlaylistProvider,
    ) -> Result<PlaylistItem, StageCrewError> {
        let item = sqlx::query_as::<_, PlaylistItem>(&format!(
            r#"
            INSERT INTO event_playlist_items (event_id, title, artist, url, provider, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {PLAYLIST_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(title)
        .bind(artist)
        .bind(url)
        .bind(provider)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PlaylistItem>, StageCrewError> {
        let item = sqlx::query_as::<_, PlaylistItem>(&format!(
            "SELECT {PLAYLIST_COLUMNS} FROM event_playlist_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Playlist entries for an event in insertion order
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<PlaylistItem>, StageCrewError> {
        let items = sqlx::query_as::<_, PlaylistItem>(&format!(
            "SELECT {PLAYLIST_COLUMNS} FROM event_playlist_items WHERE event_id = $1 ORDER BY created_at ASC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Partial update of the editable fields
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        artist: Option<&str>,
        url: Option<&str>,
        provider: Option<PlaylistProvider>,
    ) -> Result<Option<PlaylistItem>, StageCrewError> {
        let item = sqlx::query_as::<_, PlaylistItem>(&format!(
            r#"
            UPDATE event_playlist_items
            SET title = COALESCE($2, title),
                artist = COALESCE($3, artist),
                url = COALESCE($4, url),
                provider = COALESCE($5, provider),
                updated_at = $6
            WHERE id = $1
            RETURNING {PLAYLIST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(title)
        .bind(artist)
        .bind(url)
        .bind(provider)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StageCrewError> {
        let result = sqlx::query("DELETE FROM event_playlist_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
