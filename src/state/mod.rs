//! State management module
//!
//! This module holds the shared application state for the HTTP layer

pub mod context;

// Re-export commonly used state components
pub use context::AppState;
