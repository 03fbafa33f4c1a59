//! StageCrew API
//!
//! REST backend for a dance-team organization: events, member rosters,
//! performer interest and availability collection, media uploads through
//! presigned storage tickets, and the join-request workflow, all behind
//! role-gated endpoints.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, StageCrewError};

// Re-export main components for easy access
pub use router::create_router;
pub use services::ServiceFactory;
pub use state::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
