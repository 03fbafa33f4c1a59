//! StageCrew API server
//!
//! Main application entry point

use std::net::SocketAddr;
use std::time::Duration;

use tracing::info;

use StageCrew::config::Settings;
use StageCrew::database::{create_pool, run_migrations};
use StageCrew::middleware::RateLimiter;
use StageCrew::router::create_router;
use StageCrew::services::ServiceFactory;
use StageCrew::state::AppState;
use StageCrew::utils::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the server
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", StageCrew::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;

    info!("Running database migrations...");
    run_migrations(&pool).await?;

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(pool.clone(), &settings)?;
    let rate_limiter = RateLimiter::new(settings.rate_limit.clone());

    // Periodically drop rate-limit entries whose history left the window
    let limiter_for_cleanup = rate_limiter.clone();
    let cleanup_interval = Duration::from_secs(settings.rate_limit.window_seconds);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            limiter_for_cleanup.cleanup_old_entries();
        }
    });

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    let state = AppState::new(settings, pool, services);
    let app = create_router(state, rate_limiter);

    info!(address = %addr, "StageCrew API is ready");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    info!("StageCrew API has been shut down.");
    Ok(())
}
