//! Join request service implementation
//!
//! The self-service path into the team: a signed-in guest applies, admins
//! review, approval promotes the applicant to member atomically with the
//! status change. Re-submitting while a request is pending returns the
//! existing request instead of stacking a second one.

use std::collections::HashMap;

use tracing::{info, warn};
use uuid::Uuid;

use crate::database::repositories::{JoinRequestRepository, UserRepository};
use crate::models::join_request::{
    JoinRequest, JoinRequestDetail, JoinRequestStatus, ReviewAction, SubmitJoinRequest,
};
use crate::models::user::{MemberProfile, Role};
use crate::services::auth::AuthContext;
use crate::services::email::EmailService;
use crate::utils::errors::{Result, StageCrewError};
use crate::utils::logging::log_admin_action;

/// Outcome of a submission: the request plus whether it was newly created
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub request: JoinRequest,
    pub created: bool,
}

/// Join request service for the membership application flow
#[derive(Clone)]
pub struct JoinService {
    join_request_repository: JoinRequestRepository,
    user_repository: UserRepository,
    email_service: EmailService,
}

impl JoinService {
    /// Create a new JoinService instance
    pub fn new(
        join_request_repository: JoinRequestRepository,
        user_repository: UserRepository,
        email_service: EmailService,
    ) -> Self {
        Self {
            join_request_repository,
            user_repository,
            email_service,
        }
    }

    /// Submit a membership application for the signed-in caller.
    ///
    /// Idempotent while pending: a second submission returns the open
    /// request. The admin notification is best-effort and never blocks or
    /// fails the submission.
    pub async fn submit(
        &self,
        viewer: &AuthContext,
        request: SubmitJoinRequest,
    ) -> Result<SubmissionOutcome> {
        let user_id = viewer.require_subject()?;

        if viewer.has_role(Role::Member) {
            return Err(StageCrewError::InvalidInput(
                "You are already a member".to_string(),
            ));
        }

        if let Some(existing) = self
            .join_request_repository
            .find_pending_by_user(user_id)
            .await?
        {
            info!(user_id = %user_id, request_id = %existing.id, "Returning existing pending join request");
            return Ok(SubmissionOutcome {
                request: existing,
                created: false,
            });
        }

        let created = self
            .join_request_repository
            .create(user_id, request.message.as_deref())
            .await?;

        let applicant_name = viewer.name.as_deref().unwrap_or("A guest");
        self.email_service
            .notify_join_request(applicant_name, created.message.as_deref());

        info!(user_id = %user_id, request_id = %created.id, "Join request submitted");
        Ok(SubmissionOutcome {
            request: created,
            created: true,
        })
    }

    /// All requests with their applicants, optionally narrowed to one status
    pub async fn list(
        &self,
        status: Option<JoinRequestStatus>,
    ) -> Result<Vec<JoinRequestDetail>> {
        let requests = self.join_request_repository.list(status).await?;
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let applicant_ids: Vec<Uuid> = requests.iter().map(|r| r.user_id).collect();
        let applicants: HashMap<Uuid, MemberProfile> = self
            .user_repository
            .find_many_by_ids(&applicant_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, MemberProfile::from(user)))
            .collect();

        let details = requests
            .into_iter()
            .filter_map(|request| {
                let applicant = applicants.get(&request.user_id).cloned();
                if applicant.is_none() {
                    warn!(request_id = %request.id, user_id = %request.user_id, "Join request has no applicant row");
                }
                applicant.map(|applicant| JoinRequestDetail { request, applicant })
            })
            .collect();

        Ok(details)
    }

    /// Resolve a request. Approval promotes a guest applicant to member in
    /// the same transaction. Repeating the decision already taken is a
    /// no-op; reversing a resolved request is rejected.
    pub async fn review(
        &self,
        admin_id: Uuid,
        request_id: Uuid,
        action: ReviewAction,
    ) -> Result<JoinRequestDetail> {
        let request = self
            .join_request_repository
            .find_by_id(request_id)
            .await?
            .ok_or(StageCrewError::JoinRequestNotFound { request_id })?;

        let resolved = match (request.status, action) {
            (JoinRequestStatus::Pending, ReviewAction::Approved) => {
                let approved = self
                    .join_request_repository
                    .approve_and_promote(request_id)
                    .await?;
                log_admin_action(admin_id, "approve_join_request", &request_id.to_string());
                approved
            }
            (JoinRequestStatus::Pending, ReviewAction::Rejected) => {
                let rejected = self
                    .join_request_repository
                    .set_status(request_id, JoinRequestStatus::Rejected)
                    .await?
                    .ok_or(StageCrewError::JoinRequestNotFound { request_id })?;
                log_admin_action(admin_id, "reject_join_request", &request_id.to_string());
                rejected
            }
            (status, action) if status == action.as_status() => {
                info!(request_id = %request_id, status = ?status, "Join request already resolved this way");
                request
            }
            (status, action) => {
                return Err(StageCrewError::InvalidInput(format!(
                    "Request is already {:?} and cannot be changed to {:?}",
                    status,
                    action.as_status()
                )));
            }
        };

        let applicant = self
            .user_repository
            .find_by_id(resolved.user_id)
            .await?
            .ok_or(StageCrewError::UserNotFound {
                user_id: resolved.user_id,
            })?;

        Ok(JoinRequestDetail {
            request: resolved,
            applicant: MemberProfile::from(applicant),
        })
    }
}
