//! Media handlers
//!
//! Uploads go directly from the client to object storage with a presigned
//! ticket; these endpoints only issue tickets and manage the metadata rows.

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    PresignEventMediaRequest, PresignUploadRequest, RegisterMediaRequest, Role, UpdateMediaRequest,
};
use crate::services::AuthContext;
use crate::state::AppState;
use crate::utils::errors::Result;

/// POST /uploads/presign
pub async fn presign_upload(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<PresignUploadRequest>,
) -> Result<impl IntoResponse> {
    let user_id = ctx.require_subject()?;
    request.validate()?;

    let ticket = state
        .services
        .media_service
        .presign_upload(user_id, request)
        .await?;
    Ok(Json(ticket))
}

/// POST /uploads/{eventId}/media/presign
pub async fn presign_event_media(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<PresignEventMediaRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    request.validate()?;

    let ticket = state
        .services
        .media_service
        .presign_event_media(event_id, request)
        .await?;
    Ok(Json(ticket))
}

/// POST /uploads/{eventId}/media
pub async fn register_media(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<RegisterMediaRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    request.validate()?;

    let item = state
        .services
        .media_service
        .register(event_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /uploads/{eventId}/media
pub async fn list_media(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let items = state.services.media_service.list(event_id).await?;
    Ok(Json(json!({ "items": items })))
}

/// PATCH /uploads/media/{mediaId}
pub async fn update_media(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(media_id): Path<Uuid>,
    Json(request): Json<UpdateMediaRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    request.validate()?;

    let item = state
        .services
        .media_service
        .update(media_id, request)
        .await?;
    Ok(Json(item))
}

/// DELETE /uploads/media/{mediaId}
pub async fn delete_media(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(media_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;

    let deleted = state.services.media_service.delete(media_id).await?;
    Ok(Json(deleted))
}
