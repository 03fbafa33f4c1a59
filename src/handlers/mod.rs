//! HTTP handlers module
//!
//! This module contains all request handlers organized by resource:
//! - Event CRUD and the per-event final mix link
//! - Participation (interest, availability, performer roster)
//! - Member roster management
//! - Join request workflow
//! - Media upload tickets and metadata
//! - Playlist CRUD
//! - Contact form and system probes

pub mod contact;
pub mod events;
pub mod join;
pub mod media;
pub mod members;
pub mod participation;
pub mod playlist;
pub mod system;
