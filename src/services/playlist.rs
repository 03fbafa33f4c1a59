//! Playlist service implementation
//!
//! Reference tracks attached to an event. Reads are public, writes are
//! admin-gated at the route layer.

use tracing::info;
use uuid::Uuid;

use crate::database::repositories::{EventRepository, PlaylistRepository};
use crate::models::playlist::{
    CreatePlaylistItemRequest, PlaylistItem, UpdatePlaylistItemRequest,
};
use crate::utils::errors::{Result, StageCrewError};

/// Playlist service for per-event reference tracks
#[derive(Clone)]
pub struct PlaylistService {
    playlist_repository: PlaylistRepository,
    event_repository: EventRepository,
}

impl PlaylistService {
    /// Create a new PlaylistService instance
    pub fn new(playlist_repository: PlaylistRepository, event_repository: EventRepository) -> Self {
        Self {
            playlist_repository,
            event_repository,
        }
    }

    /// Playlist for one event in insertion order
    pub async fn list(&self, event_id: Uuid) -> Result<Vec<PlaylistItem>> {
        self.require_event(event_id).await?;
        self.playlist_repository.list_by_event(event_id).await
    }

    /// Add a track to an event's playlist
    pub async fn create(
        &self,
        event_id: Uuid,
        request: CreatePlaylistItemRequest,
    ) -> Result<PlaylistItem> {
        self.require_event(event_id).await?;

        let item = self
            .playlist_repository
            .create(
                event_id,
                &request.title,
                &request.artist,
                &request.url,
                request.provider,
            )
            .await?;

        info!(event_id = %event_id, item_id = %item.id, title = %item.title, "Playlist item added");
        Ok(item)
    }

    /// Partially update a track; at least one field must be present
    pub async fn update(
        &self,
        item_id: Uuid,
        request: UpdatePlaylistItemRequest,
    ) -> Result<PlaylistItem> {
        if !request.has_changes() {
            return Err(StageCrewError::InvalidInput(
                "At least one field is required".to_string(),
            ));
        }

        self.playlist_repository
            .update(
                item_id,
                request.title.as_deref(),
                request.artist.as_deref(),
                request.url.as_deref(),
                request.provider,
            )
            .await?
            .ok_or(StageCrewError::PlaylistItemNotFound { item_id })
    }

    /// Remove a track from the playlist
    pub async fn delete(&self, item_id: Uuid) -> Result<()> {
        let deleted = self.playlist_repository.delete(item_id).await?;
        if !deleted {
            return Err(StageCrewError::PlaylistItemNotFound { item_id });
        }

        info!(item_id = %item_id, "Playlist item deleted");
        Ok(())
    }

    async fn require_event(&self, event_id: Uuid) -> Result<()> {
        self.event_repository
            .find_by_id(event_id)
            .await?
            .ok_or(StageCrewError::EventNotFound { event_id })?;
        Ok(())
    }
}
