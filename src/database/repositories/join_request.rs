//! Join request repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::join_request::{JoinRequest, JoinRequestStatus};
use crate::models::user::Role;
use crate::utils::errors::StageCrewError;

const JOIN_REQUEST_COLUMNS: &str = "id, user_id, message, status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct JoinRequestRepository {
    pool: PgPool,
}

impl JoinRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new pending request for a user
    pub async fn create(
        &self,
        user_id: Uuid,
        message: Option<&str>,
    ) -> Result<JoinRequest, StageCrewError> {
        let request = sqlx::query_as::<_, JoinRequest>(&format!(
            r#"
            INSERT INTO join_requests (user_id, message, status, created_at, updated_at)
            VALUES ($1, $2, 'PENDING', $3, $3)
            RETURNING {JOIN_REQUEST_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    /// The user's open request, if any (at most one by the partial unique index)
    pub async fn find_pending_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<JoinRequest>, StageCrewError> {
        let request = sqlx::query_as::<_, JoinRequest>(&format!(
            "SELECT {JOIN_REQUEST_COLUMNS} FROM join_requests WHERE user_id = $1 AND status = 'PENDING'"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<JoinRequest>, StageCrewError> {
        let request = sqlx::query_as::<_, JoinRequest>(&format!(
            "SELECT {JOIN_REQUEST_COLUMNS} FROM join_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// List requests newest first, optionally narrowed to one status
    pub async fn list(
        &self,
        status: Option<JoinRequestStatus>,
    ) -> Result<Vec<JoinRequest>, StageCrewError> {
        let requests = match status {
            Some(status) => {
                sqlx::query_as::<_, JoinRequest>(&format!(
                    "SELECT {JOIN_REQUEST_COLUMNS} FROM join_requests WHERE status = $1 ORDER BY created_at DESC"
                ))
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, JoinRequest>(&format!(
                    "SELECT {JOIN_REQUEST_COLUMNS} FROM join_requests ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(requests)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: JoinRequestStatus,
    ) -> Result<Option<JoinRequest>, StageCrewError> {
        let request = sqlx::query_as::<_, JoinRequest>(&format!(
            r#"
            UPDATE join_requests
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING {JOIN_REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Approve a request and promote its applicant in one transaction.
    ///
    /// The promotion only raises guests; a user already holding MEMBER or
    /// ADMIN keeps that role.
    pub async fn approve_and_promote(&self, id: Uuid) -> Result<JoinRequest, StageCrewError> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let request = sqlx::query_as::<_, JoinRequest>(&format!(
            r#"
            UPDATE join_requests
            SET status = 'APPROVED', updated_at = $2
            WHERE id = $1
            RETURNING {JOIN_REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET role = $2, updated_at = $3
            WHERE id = $1 AND role = 'GUEST'
            "#,
        )
        .bind(request.user_id)
        .bind(Role::Member)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(request)
    }
}
