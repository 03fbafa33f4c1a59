//! Join workflow handlers
//!
//! Guests apply with /join-team; admins list and review the requests.
//! Approval promotes the applicant in the same transaction.

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::models::{ListJoinRequestsQuery, ReviewJoinRequest, Role, SubmitJoinRequest};
use crate::services::AuthContext;
use crate::state::AppState;
use crate::utils::errors::Result;

/// POST /join-team
pub async fn submit_join_request(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<SubmitJoinRequest>,
) -> Result<impl IntoResponse> {
    request.validate()?;

    let outcome = state.services.join_service.submit(&ctx, request).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "request": outcome.request })),
    ))
}

/// GET /join-requests
pub async fn list_join_requests(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<ListJoinRequestsQuery>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;

    let items = state.services.join_service.list(query.status).await?;
    Ok(Json(json!({ "items": items })))
}

/// POST /join-requests/{id}
pub async fn review_join_request(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(request_id): Path<Uuid>,
    Json(request): Json<ReviewJoinRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    let admin_id = ctx.require_subject()?;

    let reviewed = state
        .services
        .join_service
        .review(admin_id, request_id, request.action)
        .await?;
    Ok(Json(json!({ "request": reviewed })))
}
