//! Participation handlers
//!
//! Interest toggling, availability collection and the admin performer
//! roster. The member-facing writes only work while the event is still in
//! the future; the services enforce that gate.

use axum::extract::{Extension, Path, State};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Role, SetAvailabilityRequest, SetPerformersRequest, ToggleInterestRequest};
use crate::services::AuthContext;
use crate::state::AppState;
use crate::utils::errors::Result;

/// POST /events/{id}/interest
pub async fn toggle_interest(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<ToggleInterestRequest>,
) -> Result<impl IntoResponse> {
    let status = state
        .services
        .participation_service
        .toggle_interest(&ctx, event_id, request.interested)
        .await?;

    Ok(Json(status))
}

/// GET /events/{id}/availability
pub async fn get_availability(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let view = state
        .services
        .participation_service
        .get_availability(&ctx, event_id)
        .await?;

    Ok(Json(view))
}

/// POST /events/{id}/availability
pub async fn set_availability(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<SetAvailabilityRequest>,
) -> Result<impl IntoResponse> {
    request.validate()?;

    let submission = state
        .services
        .participation_service
        .set_availability(&ctx, event_id, request)
        .await?;

    Ok(Json(submission))
}

/// PUT /events/{id}/performers
pub async fn set_performers(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<SetPerformersRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    let admin_id = ctx.require_subject()?;

    let roster = state
        .services
        .participation_service
        .set_performers(admin_id, event_id, &request.user_ids)
        .await?;

    Ok(Json(roster))
}
