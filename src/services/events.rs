//! Event service implementation
//!
//! This service handles event CRUD, the listing filters, the final mix
//! lifecycle, and the composite detail payload that joins the event with its
//! performer roster, availability aggregate, and viewer-specific flags.

use chrono::Utc;
use tracing::{debug, info};

use crate::database::repositories::{
    AvailabilityRepository, EventRepository, InterestRepository,
};
use crate::models::availability::{build_report, normalize_days};
use crate::models::event::{
    CreateEventRequest, Event, EventCapabilities, EventDetail, EventStatusFilter, FinalMixView,
    ListEventsQuery, SetFinalMixRequest, UpdateEventRequest,
};
use crate::models::user::{MemberProfile, Role};
use crate::services::auth::AuthContext;
use crate::utils::errors::{Result, StageCrewError};
use uuid::Uuid;

/// Event service for managing the event lifecycle
#[derive(Clone)]
pub struct EventService {
    event_repository: EventRepository,
    interest_repository: InterestRepository,
    availability_repository: AvailabilityRepository,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(
        event_repository: EventRepository,
        interest_repository: InterestRepository,
        availability_repository: AvailabilityRepository,
    ) -> Self {
        Self {
            event_repository,
            interest_repository,
            availability_repository,
        }
    }

    /// Create a new event
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        let event = self.event_repository.create(request).await?;
        info!(event_id = %event.id, title = %event.title, "Event created");
        Ok(event)
    }

    /// List events, optionally narrowed by status and a title search
    pub async fn list_events(&self, query: &ListEventsQuery) -> Result<Vec<Event>> {
        let search = query.search.as_deref();
        let events = match query.status {
            EventStatusFilter::All => self.event_repository.list_all(search).await?,
            EventStatusFilter::Upcoming => {
                self.event_repository.list_upcoming(Utc::now(), search).await?
            }
            EventStatusFilter::Past => self.event_repository.list_past(Utc::now(), search).await?,
        };

        debug!(count = events.len(), status = ?query.status, "Listed events");
        Ok(events)
    }

    /// Fetch one event or fail with not-found
    pub async fn get_event(&self, event_id: Uuid) -> Result<Event> {
        self.event_repository
            .find_by_id(event_id)
            .await?
            .ok_or(StageCrewError::EventNotFound { event_id })
    }

    /// Assemble the composite detail payload for one event.
    ///
    /// Roster and availability aggregate are recomputed from the rows on
    /// every call. Viewer-specific flags are only looked up for an
    /// authenticated viewer; anonymous viewers get `interested = false` and
    /// an empty day-set without touching those tables.
    pub async fn get_event_detail(
        &self,
        event_id: Uuid,
        viewer: &AuthContext,
    ) -> Result<EventDetail> {
        let event = self.get_event(event_id).await?;

        let (performers, day_sets) = futures::try_join!(
            self.interest_repository.list_performers(event_id),
            self.availability_repository.list_day_sets(event_id),
        )?;

        let (interested, my_days) = match viewer.user_id {
            Some(user_id) => {
                let (interest, preference) = futures::try_join!(
                    self.interest_repository.find_by_event_and_user(event_id, user_id),
                    self.availability_repository.find_by_event_and_user(event_id, user_id),
                )?;
                (
                    interest.map(|record| record.interested).unwrap_or(false),
                    preference
                        .map(|row| normalize_days(&row.days))
                        .unwrap_or_default(),
                )
            }
            None => (false, Vec::new()),
        };

        let report = build_report(&day_sets);
        let can_participate = event.is_future(Utc::now()) && viewer.has_role(Role::Member);

        Ok(EventDetail {
            capabilities: EventCapabilities {
                can_set_interest: can_participate,
                can_set_availability: can_participate,
            },
            performers: performers.into_iter().map(MemberProfile::from).collect(),
            tallies: report.tallies,
            top_days: report.top_days,
            interested,
            my_days,
            event,
        })
    }

    /// Partially update an event; at least one field must be present
    pub async fn update_event(
        &self,
        event_id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<Event> {
        if !request.has_changes() {
            return Err(StageCrewError::InvalidInput(
                "At least one field is required".to_string(),
            ));
        }

        let event = self
            .event_repository
            .update(event_id, request)
            .await?
            .ok_or(StageCrewError::EventNotFound { event_id })?;

        info!(event_id = %event.id, "Event updated");
        Ok(event)
    }

    /// Delete an event; dependent interest, availability, media, and playlist
    /// rows go with it via cascading keys
    pub async fn delete_event(&self, event_id: Uuid) -> Result<()> {
        let deleted = self.event_repository.delete(event_id).await?;
        if !deleted {
            return Err(StageCrewError::EventNotFound { event_id });
        }

        info!(event_id = %event_id, "Event deleted");
        Ok(())
    }

    /// Current final mix fields for an event
    pub async fn get_final_mix(&self, event_id: Uuid) -> Result<FinalMixView> {
        let event = self.get_event(event_id).await?;
        Ok(FinalMixView::from(event))
    }

    /// Attach or replace the final mix link
    pub async fn set_final_mix(
        &self,
        event_id: Uuid,
        request: SetFinalMixRequest,
    ) -> Result<FinalMixView> {
        let event = self
            .event_repository
            .set_final_mix(
                event_id,
                request.provider,
                request.title.as_deref(),
                &request.url,
            )
            .await?
            .ok_or(StageCrewError::EventNotFound { event_id })?;

        info!(event_id = %event.id, provider = ?request.provider, "Final mix set");
        Ok(FinalMixView::from(event))
    }

    /// Detach the final mix link
    pub async fn clear_final_mix(&self, event_id: Uuid) -> Result<()> {
        let event = self
            .event_repository
            .clear_final_mix(event_id)
            .await?
            .ok_or(StageCrewError::EventNotFound { event_id })?;

        info!(event_id = %event.id, "Final mix cleared");
        Ok(())
    }
}
