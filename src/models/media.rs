//! Media model
//!
//! Media rows are registered after the client uploads directly to object
//! storage with a short-lived ticket issued by the storage collaborator.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "media_type", rename_all = "UPPERCASE")]
pub enum MediaType {
    Image,
    Video,
}

/// Storage key prefixes callers may upload under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPrefix {
    Avatars,
    Events,
}

impl UploadPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadPrefix::Avatars => "avatars",
            UploadPrefix::Events => "events",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: Uuid,
    pub event_id: Uuid,
    pub file_key: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: Option<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_extension(ext: &str) -> Result<(), ValidationError> {
    if ext.is_empty() || ext.len() > 16 {
        return Err(ValidationError::new("extension_length"));
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
        return Err(ValidationError::new("extension_charset"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PresignUploadRequest {
    pub prefix: UploadPrefix,
    #[validate(length(min = 1))]
    pub content_type: String,
    #[validate(custom(function = validate_extension))]
    pub ext: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PresignEventMediaRequest {
    #[validate(length(min = 1))]
    pub content_type: String,
    #[validate(custom(function = validate_extension))]
    pub ext: String,
}

/// Short-lived upload authorization handed back to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    pub url: String,
    pub fields: HashMap<String, String>,
    pub key: String,
    pub public_url: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMediaRequest {
    #[validate(length(min = 1))]
    pub file_key: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMediaRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
}

impl UpdateMediaRequest {
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.media_type.is_some()
    }
}

/// Response to a media deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDeleted {
    pub deleted: bool,
    pub deleted_id: Uuid,
}
