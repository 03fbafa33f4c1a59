//! System handlers
//!
//! Health probe and an auth context echo used by the frontend to decide
//! which controls to render.

use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::database;
use crate::services::AuthContext;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match database::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "up" })),
        ),
        Err(err) => {
            error!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "down" })),
            )
        }
    }
}

/// GET /auth/debug
pub async fn auth_debug(Extension(ctx): Extension<AuthContext>) -> impl IntoResponse {
    let user = ctx.is_authenticated().then_some(&ctx);
    Json(json!({ "ok": true, "user": user }))
}
