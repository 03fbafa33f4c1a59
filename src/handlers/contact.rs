//! Contact form handler

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use validator::Validate;

use crate::models::ContactRequest;
use crate::state::AppState;
use crate::utils::errors::Result;

/// POST /contactus
pub async fn contact_us(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<impl IntoResponse> {
    request.validate()?;

    state
        .services
        .email_service
        .send_contact_message(&request.name, &request.email, &request.message)
        .await?;

    Ok(Json(json!({ "status": "success" })))
}
