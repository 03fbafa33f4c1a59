//! Object storage service implementation
//!
//! This service talks to the storage gateway over HTTP: it requests
//! presigned POST tickets so browsers upload directly to the bucket, and
//! deletes objects when their media rows are removed.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::StorageConfig;
use crate::utils::errors::{Result, StageCrewError, StorageError, StorageResult};

/// Request body for the gateway presign endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresignRequest<'a> {
    bucket: &'a str,
    key: &'a str,
    content_type: &'a str,
    max_size_mb: u64,
    expires_in: u64,
}

/// Presigned POST returned by the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct PresignedPost {
    pub url: String,
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

/// Storage service for presigned uploads and object deletion
#[derive(Debug, Clone)]
pub struct StorageService {
    client: Client,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new StorageService instance
    pub fn new(config: StorageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("StageCrew-Api/1.0")
            .build()
            .map_err(StageCrewError::Http)?;

        Ok(Self { client, config })
    }

    /// Request a presigned POST for one object key
    pub async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        max_size_mb: u64,
    ) -> StorageResult<PresignedPost> {
        let url = format!("{}/presign", self.config.endpoint.trim_end_matches('/'));
        let body = PresignRequest {
            bucket: &self.config.bucket,
            key,
            content_type,
            max_size_mb,
            expires_in: self.config.presign_expiry_seconds,
        };

        debug!(key = %key, content_type = %content_type, "Requesting presigned upload");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(key = %key, status = %status, "Presign request rejected by gateway");
            return Err(StorageError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let presigned: PresignedPost = response
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;

        Ok(presigned)
    }

    /// Delete one object from the bucket
    pub async fn delete_object(&self, key: &str) -> StorageResult<()> {
        let url = format!(
            "{}/objects/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.bucket,
            urlencoding::encode(key)
        );

        debug!(key = %key, "Deleting stored object");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        // A missing object is fine: the row is being removed either way
        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(key = %key, status = %status, "Object delete rejected by gateway");
            return Err(StorageError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Ok(())
    }

    /// Public URL for a stored object
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            key
        )
    }

    /// Presign ticket lifetime in seconds
    pub fn presign_expiry_seconds(&self) -> u64 {
        self.config.presign_expiry_seconds
    }

    /// Upload ceiling for avatar objects
    pub fn avatar_max_upload_mb(&self) -> u64 {
        self.config.avatar_max_upload_mb
    }

    /// Upload ceiling for event media objects
    pub fn media_max_upload_mb(&self) -> u64 {
        self.config.media_max_upload_mb
    }
}

fn map_transport_error(e: reqwest::Error) -> StorageError {
    if e.is_timeout() {
        StorageError::Timeout
    } else if e.is_connect() {
        StorageError::ServiceUnavailable
    } else {
        StorageError::RequestFailed(e.to_string())
    }
}
