//! Join request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::MemberProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "join_request_status", rename_all = "UPPERCASE")]
pub enum JoinRequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// Admin decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewAction {
    Approved,
    Rejected,
}

impl ReviewAction {
    pub fn as_status(&self) -> JoinRequestStatus {
        match self {
            ReviewAction::Approved => JoinRequestStatus::Approved,
            ReviewAction::Rejected => JoinRequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: Option<String>,
    pub status: JoinRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SubmitJoinRequest {
    #[validate(length(min = 1, max = 2000))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewJoinRequest {
    pub action: ReviewAction,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListJoinRequestsQuery {
    pub status: Option<JoinRequestStatus>,
}

/// Join request paired with the applicant's profile for admin review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestDetail {
    #[serde(flatten)]
    pub request: JoinRequest,
    pub applicant: MemberProfile,
}
