//! Member service implementation
//!
//! Roster management: listing members, admin-side profile edits, role
//! changes, and removal. Role changes are audit logged.

use tracing::{debug, info};
use uuid::Uuid;

use crate::database::repositories::UserRepository;
use crate::models::user::{
    CreateMemberRequest, MemberProfile, Role, UpdateMemberRequest,
};
use crate::utils::errors::{Result, StageCrewError};
use crate::utils::logging::log_admin_action;

/// Member service for roster management
#[derive(Clone)]
pub struct MemberService {
    user_repository: UserRepository,
}

impl MemberService {
    /// Create a new MemberService instance
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    /// All users holding at least the member role, newest first
    pub async fn list_members(&self) -> Result<Vec<MemberProfile>> {
        let members = self.user_repository.list_members().await?;
        debug!(count = members.len(), "Listed members");
        Ok(members.into_iter().map(MemberProfile::from).collect())
    }

    /// Users an admin may assign as performers, admins first then by name
    pub async fn list_eligible_performers(&self) -> Result<Vec<MemberProfile>> {
        let users = self.user_repository.list_eligible_performers().await?;
        Ok(users.into_iter().map(MemberProfile::from).collect())
    }

    /// One member's public profile
    pub async fn get_member(&self, user_id: Uuid) -> Result<MemberProfile> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(StageCrewError::UserNotFound { user_id })?;
        Ok(MemberProfile::from(user))
    }

    /// Create a member directly, skipping the join request flow
    pub async fn create_member(&self, request: CreateMemberRequest) -> Result<MemberProfile> {
        let user = self.user_repository.create(request, Role::Member).await?;
        info!(user_id = %user.id, name = %user.name, "Member created");
        Ok(MemberProfile::from(user))
    }

    /// Partially update a member profile; at least one field must be present
    pub async fn update_member(
        &self,
        user_id: Uuid,
        request: UpdateMemberRequest,
    ) -> Result<MemberProfile> {
        if !request.has_changes() {
            return Err(StageCrewError::InvalidInput(
                "At least one field is required".to_string(),
            ));
        }

        let user = self
            .user_repository
            .update(user_id, request)
            .await?
            .ok_or(StageCrewError::UserNotFound { user_id })?;

        info!(user_id = %user.id, "Member profile updated");
        Ok(MemberProfile::from(user))
    }

    /// Overwrite a user's role. Assigning the role a user already holds is a
    /// no-op in effect, the write still happens.
    pub async fn set_role(
        &self,
        admin_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> Result<MemberProfile> {
        let user = self
            .user_repository
            .set_role(user_id, role)
            .await?
            .ok_or(StageCrewError::UserNotFound { user_id })?;

        log_admin_action(
            admin_id,
            "set_role",
            &format!("user={} role={}", user_id, role),
        );

        Ok(MemberProfile::from(user))
    }

    /// Hard-delete a user; participation rows go with them via cascade
    pub async fn delete_member(&self, admin_id: Uuid, user_id: Uuid) -> Result<()> {
        let deleted = self.user_repository.delete(user_id).await?;
        if !deleted {
            return Err(StageCrewError::UserNotFound { user_id });
        }

        log_admin_action(admin_id, "delete_member", &user_id.to_string());
        Ok(())
    }
}
