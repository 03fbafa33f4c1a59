//! Availability repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::availability::{AvailabilityPreference, Weekday};
use crate::utils::errors::StageCrewError;

const AVAILABILITY_COLUMNS: &str = "id, event_id, user_id, days, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert one user's preferred days for an event
    pub async fn upsert_days(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        days: &[Weekday],
    ) -> Result<AvailabilityPreference, StageCrewError> {
        let preference = sqlx::query_as::<_, AvailabilityPreference>(&format!(
            r#"
            INSERT INTO event_availability (event_id, user_id, days, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (event_id, user_id)
            DO UPDATE SET days = EXCLUDED.days, updated_at = EXCLUDED.updated_at
            RETURNING {AVAILABILITY_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(user_id)
        .bind(days)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(preference)
    }

    /// Find the viewer's own submission for an event
    pub async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<AvailabilityPreference>, StageCrewError> {
        let preference = sqlx::query_as::<_, AvailabilityPreference>(&format!(
            "SELECT {AVAILABILITY_COLUMNS} FROM event_availability WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(preference)
    }

    /// Every submitted day set for an event, one entry per user
    pub async fn list_day_sets(&self, event_id: Uuid) -> Result<Vec<Vec<Weekday>>, StageCrewError> {
        let day_sets = sqlx::query_scalar::<_, Vec<Weekday>>(
            "SELECT days FROM event_availability WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(day_sets)
    }
}
