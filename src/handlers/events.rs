//! Event handlers
//!
//! CRUD for events plus the final mix link that hangs off an event row.
//! Reads are public; every write is gated on the ADMIN role.

use axum::extract::{Extension, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    CreateEventRequest, ListEventsQuery, Role, SetFinalMixRequest, UpdateEventRequest,
};
use crate::services::AuthContext;
use crate::state::AppState;
use crate::utils::errors::Result;

/// GET /events
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<impl IntoResponse> {
    query.validate()?;
    let items = state.services.event_service.list_events(&query).await?;

    Ok((
        [(header::CACHE_CONTROL, "public, s-maxage=60")],
        Json(json!({ "items": items })),
    ))
}

/// GET /events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let detail = state
        .services
        .event_service
        .get_event_detail(event_id, &ctx)
        .await?;

    Ok(Json(detail))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CreateEventRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    request.validate()?;

    let event = state.services.event_service.create_event(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PATCH /events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    request.validate()?;

    let event = state
        .services
        .event_service
        .update_event(event_id, request)
        .await?;
    Ok(Json(event))
}

/// DELETE /events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;

    state.services.event_service.delete_event(event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /events/{eventId}/final-mix
pub async fn get_final_mix(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let item = state.services.event_service.get_final_mix(event_id).await?;

    Ok((
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Json(json!({ "item": item })),
    ))
}

/// PUT /events/{eventId}/final-mix
pub async fn set_final_mix(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<SetFinalMixRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    request.validate()?;

    let item = state
        .services
        .event_service
        .set_final_mix(event_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "item": item }))))
}

/// DELETE /events/{eventId}/final-mix
pub async fn clear_final_mix(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;

    state
        .services
        .event_service
        .clear_final_mix(event_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
