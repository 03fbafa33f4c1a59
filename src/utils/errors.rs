//! Error handling for StageCrew
//!
//! This module defines the main error types used throughout the application,
//! a unified result alias, and the mapping from errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Main error type for the StageCrew application
#[derive(Error, Debug)]
pub enum StageCrewError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: Uuid },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Media not found: {media_id}")]
    MediaNotFound { media_id: Uuid },

    #[error("Playlist item not found: {item_id}")]
    PlaylistItemNotFound { item_id: Uuid },

    #[error("Join request not found: {request_id}")]
    JoinRequestNotFound { request_id: Uuid },

    #[error("Cannot modify past event: {event_id}")]
    EventLocked { event_id: Uuid },

    #[error("Validation Error")]
    Validation(#[from] validator::ValidationErrors),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Authentication required: {0}")]
    Authentication(String),

    #[error("Too many requests, please try again after 10 mins.")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Storage collaborator specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage request failed: {0}")]
    RequestFailed(String),

    #[error("Storage request timed out")]
    Timeout,

    #[error("Invalid storage response: {0}")]
    InvalidResponse(String),

    #[error("Storage service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for StageCrew operations
pub type Result<T> = std::result::Result<T, StageCrewError>;

/// Result type alias for storage collaborator operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

impl StageCrewError {
    /// HTTP status this error maps to at the boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            StageCrewError::UserNotFound { .. }
            | StageCrewError::EventNotFound { .. }
            | StageCrewError::MediaNotFound { .. }
            | StageCrewError::PlaylistItemNotFound { .. }
            | StageCrewError::JoinRequestNotFound { .. } => StatusCode::NOT_FOUND,
            StageCrewError::PermissionDenied(_) | StageCrewError::EventLocked { .. } => {
                StatusCode::FORBIDDEN
            }
            StageCrewError::Validation(_) | StageCrewError::InvalidInput(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            StageCrewError::Authentication(_) => StatusCode::UNAUTHORIZED,
            StageCrewError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            StageCrewError::Storage(_) | StageCrewError::ServiceUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StageCrewError::Database(_) => ErrorSeverity::Critical,
            StageCrewError::Migration(_) => ErrorSeverity::Critical,
            StageCrewError::Config(_) => ErrorSeverity::Critical,
            StageCrewError::PermissionDenied(_) => ErrorSeverity::Warning,
            StageCrewError::EventLocked { .. } => ErrorSeverity::Warning,
            StageCrewError::Authentication(_) => ErrorSeverity::Warning,
            StageCrewError::RateLimitExceeded => ErrorSeverity::Warning,
            StageCrewError::Validation(_) => ErrorSeverity::Info,
            StageCrewError::InvalidInput(_) => ErrorSeverity::Info,
            StageCrewError::UserNotFound { .. }
            | StageCrewError::EventNotFound { .. }
            | StageCrewError::MediaNotFound { .. }
            | StageCrewError::PlaylistItemNotFound { .. }
            | StageCrewError::JoinRequestNotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Message exposed to the client; internals stay server-side
    fn client_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for StageCrewError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(status = %status, error = %self, "request failed")
            }
            ErrorSeverity::Warning => {
                tracing::warn!(status = %status, error = %self, "request rejected")
            }
            ErrorSeverity::Info => {
                tracing::debug!(status = %status, error = %self, "request rejected")
            }
        }

        let body = match &self {
            StageCrewError::Validation(errors) => json!({
                "error": "Validation Error",
                "details": errors,
            }),
            _ => json!({ "error": self.client_message() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
