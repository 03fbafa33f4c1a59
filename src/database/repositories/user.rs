//! User repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{CreateMemberRequest, Role, UpdateMemberRequest, User};
use crate::utils::errors::StageCrewError;

const USER_COLUMNS: &str = "id, name, email, avatar_url, description, role, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with the given role
    pub async fn create(
        &self,
        request: CreateMemberRequest,
        role: Role,
    ) -> Result<User, StageCrewError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, avatar_url, description, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(request.name)
        .bind(request.avatar_url)
        .bind(request.description)
        .bind(role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StageCrewError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user profile fields
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMemberRequest,
    ) -> Result<Option<User>, StageCrewError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                avatar_url = COALESCE($3, avatar_url),
                description = COALESCE($4, description),
                updated_at = $5
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.avatar_url)
        .bind(request.description)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Overwrite a user's role
    pub async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<User>, StageCrewError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET role = $2, updated_at = $3
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(role)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Delete user; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool, StageCrewError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List team members (MEMBER and ADMIN roles), newest first
    pub async fn list_members(&self) -> Result<Vec<User>, StageCrewError> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE role IN ('MEMBER', 'ADMIN')
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Users eligible for the performer roster: admins first, then members,
    /// alphabetical within each role
    pub async fn list_eligible_performers(&self) -> Result<Vec<User>, StageCrewError> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE role IN ('MEMBER', 'ADMIN')
            ORDER BY role DESC, name ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Fetch a set of users by ID, alphabetical
    pub async fn find_many_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, StageCrewError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1) ORDER BY name ASC"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

}
