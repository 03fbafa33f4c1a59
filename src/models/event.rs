//! Event model
//!
//! An event is mutable only while its date lies in the future; that state is
//! derived from the date at read time and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::availability::{DayTally, Weekday, WeekdayTallies};
use crate::models::user::MemberProfile;

/// Where a final mix is hosted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "final_mix_provider", rename_all = "UPPERCASE")]
pub enum FinalMixProvider {
    External,
    Soundcloud,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub cover_url: Option<String>,
    pub final_mix_provider: Option<FinalMixProvider>,
    pub final_mix_title: Option<String>,
    pub final_mix_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Lifecycle predicate: writes to interest and availability are only
    /// allowed while this returns true.
    pub fn is_future(&self, now: DateTime<Utc>) -> bool {
        self.date > now
    }
}

/// Final mix fields of an event, as exposed on the final-mix endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalMixView {
    pub id: Uuid,
    pub provider: Option<FinalMixProvider>,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl From<Event> for FinalMixView {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            provider: event.final_mix_provider,
            title: event.final_mix_title,
            url: event.final_mix_url,
        }
    }
}

/// Status filter for the event listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatusFilter {
    All,
    Upcoming,
    Past,
}

impl Default for EventStatusFilter {
    fn default() -> Self {
        EventStatusFilter::All
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListEventsQuery {
    #[serde(default)]
    pub status: EventStatusFilter,
    #[validate(length(max = 120))]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(length(min = 1, max = 400))]
    pub location: String,
    pub date: DateTime<Utc>,
    #[validate(url)]
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 400))]
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[validate(url)]
    pub cover_url: Option<String>,
}

impl UpdateEventRequest {
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.location.is_some()
            || self.date.is_some()
            || self.cover_url.is_some()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetFinalMixRequest {
    pub provider: FinalMixProvider,
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,
    #[validate(url, length(max = 500))]
    pub url: String,
}

/// What the viewer is allowed to do with this event right now
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCapabilities {
    pub can_set_interest: bool,
    pub can_set_availability: bool,
}

/// Composite payload for the event detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub event: Event,
    pub capabilities: EventCapabilities,
    pub performers: Vec<MemberProfile>,
    pub tallies: WeekdayTallies,
    pub top_days: Vec<DayTally>,
    pub interested: bool,
    pub my_days: Vec<Weekday>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event_at(date: DateTime<Utc>) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Winter Showcase".to_string(),
            location: "Main Hall".to_string(),
            date,
            cover_url: None,
            final_mix_provider: None,
            final_mix_title: None,
            final_mix_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_future_boundaries() {
        let now = Utc::now();

        assert!(event_at(now + Duration::days(1)).is_future(now));
        assert!(!event_at(now - Duration::days(1)).is_future(now));
        // the exact instant counts as past
        assert!(!event_at(now).is_future(now));
    }

    #[test]
    fn test_status_filter_default() {
        let query: ListEventsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.status, EventStatusFilter::All);

        let query: ListEventsQuery = serde_json::from_str(r#"{"status":"upcoming"}"#).unwrap();
        assert_eq!(query.status, EventStatusFilter::Upcoming);
    }

    #[test]
    fn test_update_event_request_has_changes() {
        assert!(!UpdateEventRequest::default().has_changes());
        let change = UpdateEventRequest {
            location: Some("Studio B".to_string()),
            ..Default::default()
        };
        assert!(change.has_changes());
    }
}
