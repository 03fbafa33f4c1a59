//! Participation service implementation
//!
//! Interest toggling, availability collection, and the admin performer
//! override. Every participation write passes the same lifecycle gate: the
//! event must exist and its date must still lie in the future. The gate is
//! re-evaluated on each call because time advances between requests.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::repositories::{
    AvailabilityRepository, EventRepository, InterestRepository, UserRepository,
};
use crate::models::availability::{
    build_report, normalize_days, AvailabilitySubmission, AvailabilityView,
    SetAvailabilityRequest,
};
use crate::models::event::Event;
use crate::models::interest::{InterestStatus, PerformerRoster};
use crate::models::user::{MemberProfile, Role};
use crate::services::auth::AuthContext;
use crate::utils::errors::{Result, StageCrewError};
use crate::utils::logging::log_admin_action;

/// Participation service for interest and availability writes
#[derive(Clone)]
pub struct ParticipationService {
    event_repository: EventRepository,
    interest_repository: InterestRepository,
    availability_repository: AvailabilityRepository,
    user_repository: UserRepository,
}

impl ParticipationService {
    /// Create a new ParticipationService instance
    pub fn new(
        event_repository: EventRepository,
        interest_repository: InterestRepository,
        availability_repository: AvailabilityRepository,
        user_repository: UserRepository,
    ) -> Self {
        Self {
            event_repository,
            interest_repository,
            availability_repository,
            user_repository,
        }
    }

    /// Record the caller's interest flag and return the fresh performer count
    pub async fn toggle_interest(
        &self,
        viewer: &AuthContext,
        event_id: Uuid,
        interested: bool,
    ) -> Result<InterestStatus> {
        viewer.require_role(Role::Member)?;
        let user_id = viewer.require_subject()?;
        self.require_open_event(event_id).await?;

        let record = self
            .interest_repository
            .upsert(event_id, user_id, interested)
            .await?;
        let performer_count = self.interest_repository.count_interested(event_id).await?;

        info!(
            event_id = %event_id,
            user_id = %user_id,
            interested = record.interested,
            performer_count = performer_count,
            "Interest toggled"
        );

        Ok(InterestStatus {
            interested: record.interested,
            performer_count,
        })
    }

    /// Availability aggregate for one event plus the viewer's own day-set.
    ///
    /// Readable by anyone; an anonymous viewer gets an empty day-set without
    /// a row lookup.
    pub async fn get_availability(
        &self,
        viewer: &AuthContext,
        event_id: Uuid,
    ) -> Result<AvailabilityView> {
        self.require_event(event_id).await?;

        let day_sets = self.availability_repository.list_day_sets(event_id).await?;
        let my_days = match viewer.user_id {
            Some(user_id) => self
                .availability_repository
                .find_by_event_and_user(event_id, user_id)
                .await?
                .map(|row| normalize_days(&row.days))
                .unwrap_or_default(),
            None => Vec::new(),
        };

        let report = build_report(&day_sets);
        Ok(AvailabilityView {
            event_id,
            tallies: report.tallies,
            top_days: report.top_days,
            my_days,
        })
    }

    /// Replace the caller's day-set wholesale and return the new aggregate
    pub async fn set_availability(
        &self,
        viewer: &AuthContext,
        event_id: Uuid,
        request: SetAvailabilityRequest,
    ) -> Result<AvailabilitySubmission> {
        viewer.require_role(Role::Member)?;
        let user_id = viewer.require_subject()?;
        self.require_open_event(event_id).await?;

        // Duplicates in one submission must not double-count the caller
        let days = normalize_days(&request.days);
        let saved = self
            .availability_repository
            .upsert_days(event_id, user_id, &days)
            .await?;

        let day_sets = self.availability_repository.list_day_sets(event_id).await?;
        let report = build_report(&day_sets);

        info!(
            event_id = %event_id,
            user_id = %user_id,
            days = ?saved.days,
            "Availability submitted"
        );

        Ok(AvailabilitySubmission {
            my_days: saved.days,
            tallies: report.tallies,
            top_days: report.top_days,
        })
    }

    /// Replace the entire interested set for an event in one transaction.
    ///
    /// Admin override: unlike the self-service writes this is not gated on
    /// the event date, so a roster can still be corrected after the fact.
    pub async fn set_performers(
        &self,
        admin_id: Uuid,
        event_id: Uuid,
        user_ids: &[Uuid],
    ) -> Result<PerformerRoster> {
        self.require_event(event_id).await?;

        let unique_ids: Vec<Uuid> = user_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let known = self.user_repository.find_many_by_ids(&unique_ids).await?;
        if known.len() != unique_ids.len() {
            let known_ids: BTreeSet<Uuid> = known.iter().map(|user| user.id).collect();
            let missing: Vec<String> = unique_ids
                .iter()
                .filter(|id| !known_ids.contains(id))
                .map(Uuid::to_string)
                .collect();
            return Err(StageCrewError::InvalidInput(format!(
                "Unknown user ids: {}",
                missing.join(", ")
            )));
        }

        self.interest_repository
            .replace_performers(event_id, &unique_ids)
            .await?;

        let performers = self.interest_repository.list_performers(event_id).await?;
        log_admin_action(admin_id, "set_performers", &event_id.to_string());

        Ok(PerformerRoster {
            count: performers.len() as i64,
            performers: performers.into_iter().map(MemberProfile::from).collect(),
        })
    }

    /// The event, or not-found
    async fn require_event(&self, event_id: Uuid) -> Result<Event> {
        self.event_repository
            .find_by_id(event_id)
            .await?
            .ok_or(StageCrewError::EventNotFound { event_id })
    }

    /// Lifecycle gate for participation writes
    async fn require_open_event(&self, event_id: Uuid) -> Result<Event> {
        let event = self.require_event(event_id).await?;
        if !event.is_future(Utc::now()) {
            debug!(event_id = %event_id, date = %event.date, "Rejected write to past event");
            return Err(StageCrewError::EventLocked { event_id });
        }
        Ok(event)
    }
}
