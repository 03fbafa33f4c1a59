//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod email;
pub mod events;
pub mod join;
pub mod media;
pub mod members;
pub mod participation;
pub mod playlist;
pub mod storage;

// Re-export commonly used services
pub use auth::{AuthContext, AuthService, Claims};
pub use email::EmailService;
pub use events::EventService;
pub use join::{JoinService, SubmissionOutcome};
pub use media::MediaService;
pub use members::MemberService;
pub use participation::ParticipationService;
pub use playlist::PlaylistService;
pub use storage::{PresignedPost, StorageService};

use crate::config::Settings;
use crate::database::repositories::{
    AvailabilityRepository, EventRepository, InterestRepository, JoinRequestRepository,
    MediaRepository, PlaylistRepository, UserRepository,
};
use crate::database::DatabasePool;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub event_service: EventService,
    pub participation_service: ParticipationService,
    pub member_service: MemberService,
    pub join_service: JoinService,
    pub media_service: MediaService,
    pub playlist_service: PlaylistService,
    pub storage_service: StorageService,
    pub email_service: EmailService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(pool: DatabasePool, settings: &Settings) -> Result<Self> {
        let user_repository = UserRepository::new(pool.clone());
        let event_repository = EventRepository::new(pool.clone());
        let interest_repository = InterestRepository::new(pool.clone());
        let availability_repository = AvailabilityRepository::new(pool.clone());
        let join_request_repository = JoinRequestRepository::new(pool.clone());
        let media_repository = MediaRepository::new(pool.clone());
        let playlist_repository = PlaylistRepository::new(pool);

        let storage_service = StorageService::new(settings.storage.clone())?;
        let email_service = EmailService::new(settings.email.clone())?;

        let auth_service = AuthService::new(user_repository.clone(), &settings.auth);
        let event_service = EventService::new(
            event_repository.clone(),
            interest_repository.clone(),
            availability_repository.clone(),
        );
        let participation_service = ParticipationService::new(
            event_repository.clone(),
            interest_repository,
            availability_repository,
            user_repository.clone(),
        );
        let member_service = MemberService::new(user_repository.clone());
        let join_service = JoinService::new(
            join_request_repository,
            user_repository,
            email_service.clone(),
        );
        let media_service = MediaService::new(
            media_repository,
            event_repository.clone(),
            storage_service.clone(),
        );
        let playlist_service = PlaylistService::new(playlist_repository, event_repository);

        Ok(Self {
            auth_service,
            event_service,
            participation_service,
            member_service,
            join_service,
            media_service,
            playlist_service,
            storage_service,
            email_service,
        })
    }
}
