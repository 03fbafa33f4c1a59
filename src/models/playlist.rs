//! Playlist model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "playlist_provider", rename_all = "UPPERCASE")]
pub enum PlaylistProvider {
    Youtube,
    Soundcloud,
    Spotify,
    External,
}

impl Default for PlaylistProvider {
    fn default() -> Self {
        PlaylistProvider::External
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub id: Uuid,
    pub event_id: Uuid,
    pub title: String,
    pub artist: String,
    pub url: String,
    pub provider: PlaylistProvider,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlaylistItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub artist: String,
    #[validate(url, length(max = 1000))]
    pub url: String,
    #[serde(default)]
    pub provider: PlaylistProvider,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePlaylistItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub artist: Option<String>,
    #[validate(url, length(max = 1000))]
    pub url: Option<String>,
    pub provider: Option<PlaylistProvider>,
}

impl UpdatePlaylistItemRequest {
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.artist.is_some()
            || self.url.is_some()
            || self.provider.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults_to_external() {
        let request: CreatePlaylistItemRequest = serde_json::from_str(
            r#"{"title":"Uptown Funk","artist":"Mark Ronson","url":"https://example.com/t"}"#,
        )
        .unwrap();
        assert_eq!(request.provider, PlaylistProvider::External);
    }

    #[test]
    fn test_update_request_requires_a_field() {
        assert!(!UpdatePlaylistItemRequest::default().has_changes());
        let change = UpdatePlaylistItemRequest {
            provider: Some(PlaylistProvider::Spotify),
            ..Default::default()
        };
        assert!(change.has_changes());
    }
}
