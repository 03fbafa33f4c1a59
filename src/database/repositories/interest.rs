//! Interest repository implementation
//!
//! One row per (event, user); the unique key serializes concurrent upserts
//! for the same pair at the database level.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::interest::InterestRecord;
use crate::models::user::User;
use crate::utils::errors::StageCrewError;

const INTEREST_COLUMNS: &str = "id, event_id, user_id, interested, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct InterestRepository {
    pool: PgPool,
}

impl InterestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert the interest flag for one (event, user) pair
    pub async fn upsert(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        interested: bool,
    ) -> Result<InterestRecord, StageCrewError> {
        let record = sqlx::query_as::<_, InterestRecord>(&format!(
            r#"
            INSERT INTO event_interests (event_id, user_id, interested, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (event_id, user_id)
            DO UPDATE SET interested = EXCLUDED.interested, updated_at = EXCLUDED.updated_at
            RETURNING {INTEREST_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(user_id)
        .bind(interested)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Find the viewer's own record for an event
    pub async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<InterestRecord>, StageCrewError> {
        let record = sqlx::query_as::<_, InterestRecord>(&format!(
            "SELECT {INTEREST_COLUMNS} FROM event_interests WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Number of users currently marked interested for an event
    pub async fn count_interested(&self, event_id: Uuid) -> Result<i64, StageCrewError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM event_interests WHERE event_id = $1 AND interested = TRUE",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// The performer roster: every interested user's profile, alphabetical
    pub async fn list_performers(&self, event_id: Uuid) -> Result<Vec<User>, StageCrewError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.avatar_url, u.description, u.role,
                   u.created_at, u.updated_at
            FROM users u
            INNER JOIN event_interests i ON i.user_id = u.id
            WHERE i.event_id = $1 AND i.interested = TRUE
            ORDER BY u.name ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Replace the interested set for an event in a single transaction.
    ///
    /// Interested rows for users outside `user_ids` are deleted (all of them
    /// when the list is empty); rows with `interested = FALSE` are left
    /// untouched; every listed user ends up interested.
    pub async fn replace_performers(
        &self,
        event_id: Uuid,
        user_ids: &[Uuid],
    ) -> Result<(), StageCrewError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM event_interests
            WHERE event_id = $1 AND interested = TRUE AND user_id != ALL($2)
            "#,
        )
        .bind(event_id)
        .bind(user_ids)
        .execute(&mut *tx)
        .await?;

        let now = Utc::now();
        for user_id in user_ids {
            sqlx::query(
                r#"
                INSERT INTO event_interests (event_id, user_id, interested, created_at, updated_at)
                VALUES ($1, $2, TRUE, $3, $3)
                ON CONFLICT (event_id, user_id)
                DO UPDATE SET interested = TRUE, updated_at = EXCLUDED.updated_at
                "#,
            )
            .bind(event_id)
            .bind(user_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
