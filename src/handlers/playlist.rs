//! Playlist handlers
//!
//! Public reads, admin writes. Items hang off an event and are returned in
//! insertion order.

use axum::extract::{Extension, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreatePlaylistItemRequest, Role, UpdatePlaylistItemRequest};
use crate::services::AuthContext;
use crate::state::AppState;
use crate::utils::errors::Result;

/// GET /events/{eventId}/playlist
pub async fn list_playlist(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let items = state.services.playlist_service.list(event_id).await?;

    Ok((
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Json(json!({ "items": items })),
    ))
}

/// POST /events/{eventId}/playlist
pub async fn create_playlist_item(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<CreatePlaylistItemRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    request.validate()?;

    let item = state
        .services
        .playlist_service
        .create(event_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /playlist/{playlistId}
pub async fn update_playlist_item(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(item_id): Path<Uuid>,
    Json(request): Json<UpdatePlaylistItemRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    request.validate()?;

    let item = state
        .services
        .playlist_service
        .update(item_id, request)
        .await?;
    Ok(Json(item))
}

/// DELETE /playlist/{playlistId}
pub async fn delete_playlist_item(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;

    state.services.playlist_service.delete(item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
