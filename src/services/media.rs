//! Media service implementation
//!
//! Uploads go directly from the browser to object storage with a short-lived
//! ticket; the API only hands out tickets and records the resulting object
//! once the client reports completion. Keys carry a random suffix so an
//! object is never overwritten once written.

use tracing::info;
use uuid::Uuid;

use crate::database::repositories::{EventRepository, MediaRepository};
use crate::models::media::{
    MediaDeleted, MediaItem, PresignEventMediaRequest, PresignUploadRequest, RegisterMediaRequest,
    UpdateMediaRequest, UploadPrefix, UploadTicket,
};
use crate::services::storage::StorageService;
use crate::utils::errors::{Result, StageCrewError};
use crate::utils::helpers::{generate_random_string, sanitize_extension};

/// Source tag recorded on rows registered through this service
const STORAGE_SOURCE: &str = "S3";

const KEY_SUFFIX_LENGTH: usize = 16;

/// Media service for upload tickets and the per-event gallery
#[derive(Clone)]
pub struct MediaService {
    media_repository: MediaRepository,
    event_repository: EventRepository,
    storage_service: StorageService,
}

impl MediaService {
    /// Create a new MediaService instance
    pub fn new(
        media_repository: MediaRepository,
        event_repository: EventRepository,
        storage_service: StorageService,
    ) -> Self {
        Self {
            media_repository,
            event_repository,
            storage_service,
        }
    }

    /// Issue an upload ticket under the caller's own key space
    pub async fn presign_upload(
        &self,
        user_id: Uuid,
        request: PresignUploadRequest,
    ) -> Result<UploadTicket> {
        let key = format!(
            "{}/{}/{}.{}",
            request.prefix.as_str(),
            user_id,
            generate_random_string(KEY_SUFFIX_LENGTH),
            sanitize_extension(&request.ext)
        );

        let max_size_mb = match request.prefix {
            UploadPrefix::Avatars => self.storage_service.avatar_max_upload_mb(),
            UploadPrefix::Events => self.storage_service.media_max_upload_mb(),
        };

        self.issue_ticket(key, &request.content_type, max_size_mb)
            .await
    }

    /// Issue an upload ticket for one event's gallery
    pub async fn presign_event_media(
        &self,
        event_id: Uuid,
        request: PresignEventMediaRequest,
    ) -> Result<UploadTicket> {
        self.require_event(event_id).await?;

        let key = format!(
            "events/{}/{}.{}",
            event_id,
            generate_random_string(KEY_SUFFIX_LENGTH),
            sanitize_extension(&request.ext)
        );

        self.issue_ticket(
            key,
            &request.content_type,
            self.storage_service.media_max_upload_mb(),
        )
        .await
    }

    /// Record a completed upload against an event
    pub async fn register(
        &self,
        event_id: Uuid,
        request: RegisterMediaRequest,
    ) -> Result<MediaItem> {
        self.require_event(event_id).await?;

        let url = self.storage_service.public_url(&request.file_key);
        let item = self
            .media_repository
            .create(
                event_id,
                request.media_type,
                &request.file_key,
                &url,
                request.title.as_deref(),
                STORAGE_SOURCE,
            )
            .await?;

        info!(event_id = %event_id, media_id = %item.id, key = %item.file_key, "Media registered");
        Ok(item)
    }

    /// Gallery for one event, newest first
    pub async fn list(&self, event_id: Uuid) -> Result<Vec<MediaItem>> {
        self.require_event(event_id).await?;
        self.media_repository.list_by_event(event_id).await
    }

    /// Partially update a media row; at least one field must be present
    pub async fn update(
        &self,
        media_id: Uuid,
        request: UpdateMediaRequest,
    ) -> Result<MediaItem> {
        if !request.has_changes() {
            return Err(StageCrewError::InvalidInput(
                "At least one field is required".to_string(),
            ));
        }

        self.media_repository
            .update(media_id, request.title.as_deref(), request.media_type)
            .await?
            .ok_or(StageCrewError::MediaNotFound { media_id })
    }

    /// Delete a media row together with its backing object.
    ///
    /// The object goes first; if storage refuses, the row stays so the
    /// gallery never references an object we failed to remove.
    pub async fn delete(&self, media_id: Uuid) -> Result<MediaDeleted> {
        let item = self
            .media_repository
            .find_by_id(media_id)
            .await?
            .ok_or(StageCrewError::MediaNotFound { media_id })?;

        self.storage_service.delete_object(&item.file_key).await?;

        let deleted = self.media_repository.delete(media_id).await?;
        info!(media_id = %media_id, key = %item.file_key, "Media deleted");

        Ok(MediaDeleted {
            deleted,
            deleted_id: media_id,
        })
    }

    async fn issue_ticket(
        &self,
        key: String,
        content_type: &str,
        max_size_mb: u64,
    ) -> Result<UploadTicket> {
        let presigned = self
            .storage_service
            .presign_upload(&key, content_type, max_size_mb)
            .await?;

        let public_url = self.storage_service.public_url(&key);
        Ok(UploadTicket {
            url: presigned.url,
            fields: presigned.fields,
            key,
            public_url,
            expires_in: self.storage_service.presign_expiry_seconds(),
        })
    }

    async fn require_event(&self, event_id: Uuid) -> Result<()> {
        self.event_repository
            .find_by_id(event_id)
            .await?
            .ok_or(StageCrewError::EventNotFound { event_id })?;
        Ok(())
    }
}
