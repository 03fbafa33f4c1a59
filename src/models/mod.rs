//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;
pub mod availability;
pub mod interest;
pub mod join_request;
pub mod media;
pub mod playlist;
pub mod contact;

// Re-export commonly used models
pub use user::{User, Role, MemberProfile, CreateMemberRequest, UpdateMemberRequest, UpdateRoleRequest};
pub use event::{
    Event, EventCapabilities, EventDetail, EventStatusFilter, FinalMixProvider, FinalMixView,
    ListEventsQuery, CreateEventRequest, UpdateEventRequest, SetFinalMixRequest,
};
pub use availability::{
    AvailabilityPreference, AvailabilityReport, AvailabilitySubmission, AvailabilityView,
    DayTally, SetAvailabilityRequest, Weekday, WeekdayTallies, WEEKDAYS,
};
pub use interest::{
    InterestRecord, InterestStatus, PerformerRoster, SetPerformersRequest, ToggleInterestRequest,
};
pub use join_request::{
    JoinRequest, JoinRequestDetail, JoinRequestStatus, ListJoinRequestsQuery, ReviewAction,
    ReviewJoinRequest, SubmitJoinRequest,
};
pub use media::{
    MediaDeleted, MediaItem, MediaType, PresignEventMediaRequest, PresignUploadRequest,
    RegisterMediaRequest, UpdateMediaRequest, UploadPrefix, UploadTicket,
};
pub use playlist::{
    CreatePlaylistItemRequest, PlaylistItem, PlaylistProvider, UpdatePlaylistItemRequest,
};
pub use contact::ContactRequest;
