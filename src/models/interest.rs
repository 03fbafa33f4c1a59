//! Interest model
//!
//! One row per (event, user) with a boolean flag; the performer roster of an
//! event is every user whose flag is set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::MemberProfile;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InterestRecord {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub interested: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ToggleInterestRequest {
    pub interested: bool,
}

/// Response to an interest toggle; the count is recomputed on every call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestStatus {
    pub interested: bool,
    pub performer_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPerformersRequest {
    pub user_ids: Vec<Uuid>,
}

/// Result of a performer-roster replacement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerRoster {
    pub count: i64,
    pub performers: Vec<MemberProfile>,
}
