//! Application state
//!
//! Shared state handed to every route handler. Everything in here is cheap
//! to clone; the pool and service factory are reference-counted internally.

use std::sync::Arc;

use crate::config::Settings;
use crate::database::DatabasePool;
use crate::services::ServiceFactory;

/// Application-wide state containing services and settings
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub pool: DatabasePool,
    pub services: Arc<ServiceFactory>,
}

impl AppState {
    /// Create a new AppState from the assembled pieces
    pub fn new(settings: Settings, pool: DatabasePool, services: ServiceFactory) -> Self {
        Self {
            settings: Arc::new(settings),
            pool,
            services: Arc::new(services),
        }
    }
}
