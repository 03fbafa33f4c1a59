//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod availability;
pub mod event;
pub mod interest;
pub mod join_request;
pub mod media;
pub mod playlist;
pub mod user;

// Re-export repositories
pub use availability::AvailabilityRepository;
pub use event::EventRepository;
pub use interest::InterestRepository;
pub use join_request::JoinRequestRepository;
pub use media::MediaRepository;
pub use playlist::PlaylistRepository;
pub use user::UserRepository;
