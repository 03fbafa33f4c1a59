//! Member handlers
//!
//! The public roster plus the admin-only management surface (create,
//! update, role changes, removal, and the eligible-performer pool).

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateMemberRequest, Role, UpdateMemberRequest, UpdateRoleRequest};
use crate::services::AuthContext;
use crate::state::AppState;
use crate::utils::errors::Result;

/// GET /members
pub async fn list_members(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.services.member_service.list_members().await?;
    Ok(Json(json!({ "items": items })))
}

/// GET /members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let member = state.services.member_service.get_member(user_id).await?;
    Ok(Json(member))
}

/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CreateMemberRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    request.validate()?;

    let member = state.services.member_service.create_member(request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PATCH /members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    request.validate()?;

    let member = state
        .services
        .member_service
        .update_member(user_id, request)
        .await?;
    Ok(Json(member))
}

/// PATCH /members/{id}/role
pub async fn set_member_role(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    let admin_id = ctx.require_subject()?;

    let member = state
        .services
        .member_service
        .set_role(admin_id, user_id, request.role)
        .await?;
    Ok(Json(member))
}

/// DELETE /members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;
    let admin_id = ctx.require_subject()?;

    state
        .services
        .member_service
        .delete_member(admin_id, user_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Member deleted",
    })))
}

/// GET /admin/eligible-performers
pub async fn list_eligible_performers(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<impl IntoResponse> {
    ctx.require_role(Role::Admin)?;

    let items = state
        .services
        .member_service
        .list_eligible_performers()
        .await?;
    Ok(Json(json!({ "items": items })))
}
