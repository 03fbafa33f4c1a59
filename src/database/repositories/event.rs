//! Event repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::event::{CreateEventRequest, Event, FinalMixProvider, UpdateEventRequest};
use crate::utils::errors::StageCrewError;

const EVENT_COLUMNS: &str = "id, title, location, date, cover_url, final_mix_provider, \
     final_mix_title, final_mix_url, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, StageCrewError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (title, location, date, cover_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(request.title)
        .bind(request.location)
        .bind(request.date)
        .bind(request.cover_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, StageCrewError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// All events, newest date first
    pub async fn list_all(&self, search: Option<&str>) -> Result<Vec<Event>, StageCrewError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE ($1::TEXT IS NULL OR title ILIKE $1)
            ORDER BY date DESC
            "#
        ))
        .bind(search_pattern(search))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Events dated now or later, soonest first
    pub async fn list_upcoming(
        &self,
        now: DateTime<Utc>,
        search: Option<&str>,
    ) -> Result<Vec<Event>, StageCrewError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE date >= $1 AND ($2::TEXT IS NULL OR title ILIKE $2)
            ORDER BY date ASC
            "#
        ))
        .bind(now)
        .bind(search_pattern(search))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Events dated before now, most recent first
    pub async fn list_past(
        &self,
        now: DateTime<Utc>,
        search: Option<&str>,
    ) -> Result<Vec<Event>, StageCrewError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE date < $1 AND ($2::TEXT IS NULL OR title ILIKE $2)
            ORDER BY date DESC
            "#
        ))
        .bind(now)
        .bind(search_pattern(search))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Partial update of event fields
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<Option<Event>, StageCrewError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                location = COALESCE($3, location),
                date = COALESCE($4, date),
                cover_url = COALESCE($5, cover_url),
                updated_at = $6
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.location)
        .bind(request.date)
        .bind(request.cover_url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event; returns whether a row was removed. Dependent interest,
    /// availability, media and playlist rows cascade at the schema level.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StageCrewError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Attach or replace the final mix link
    pub async fn set_final_mix(
        &self,
        id: Uuid,
        provider: FinalMixProvider,
        title: Option<&str>,
        url: &str,
    ) -> Result<Option<Event>, StageCrewError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET final_mix_provider = $2, final_mix_title = $3, final_mix_url = $4, updated_at = $5
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(provider)
        .bind(title)
        .bind(url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Clear the final mix link
    pub async fn clear_final_mix(&self, id: Uuid) -> Result<Option<Event>, StageCrewError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET final_mix_provider = NULL, final_mix_title = NULL, final_mix_url = NULL,
                updated_at = $2
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }
}

/// Wrap a search term for ILIKE matching, escaping pattern metacharacters
fn search_pattern(search: Option<&str>) -> Option<String> {
    search.map(|term| {
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    })
}
