//! Event media repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::media::{MediaItem, MediaType};
use crate::utils::errors::StageCrewError;

const MEDIA_COLUMNS: &str =
    "id, event_id, file_key, url, media_type, title, source, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an uploaded object against an event
    pub async fn create(
        &self,
        event_id: Uuid,
        media_type: MediaType,
        file_key: &str,
        url: &str,
        title: Option<&str>,
        source: &str,
    ) -> Result<MediaItem, StageCrewError> {
        let item = sqlx::query_as::<_, MediaItem>(&format!(
            r#"
            INSERT INTO event_media (event_id, media_type, file_key, url, title, source, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {MEDIA_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(media_type)
        .bind(file_key)
        .bind(url)
        .bind(title)
        .bind(source)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaItem>, StageCrewError> {
        let item = sqlx::query_as::<_, MediaItem>(&format!(
            "SELECT {MEDIA_COLUMNS} FROM event_media WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// All media for an event, newest first
    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<MediaItem>, StageCrewError> {
        let items = sqlx::query_as::<_, MediaItem>(&format!(
            "SELECT {MEDIA_COLUMNS} FROM event_media WHERE event_id = $1 ORDER BY created_at DESC"
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
        media_type: Option<MediaType>,
    ) -> Result<Option<MediaItem>, StageCrewError> {
        let item = sqlx::query_as::<_, MediaItem>(&format!(
            r#"
            UPDATE event_media
            SET title = COALESCE($2, title),
                media_type = COALESCE($3, media_type),
                updated_at = $4
            WHERE id = $1
            RETURNING {MEDIA_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(title)
        .bind(media_type)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StageCrewError> {
        let result = sqlx::query("DELETE FROM event_media WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
