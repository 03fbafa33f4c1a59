//! HTTP router assembly
//!
//! All routes share the auth middleware, which resolves the caller's
//! context without ever rejecting a request; role checks happen in the
//! handlers. Only the public write endpoints are rate limited.

use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::Settings;
use crate::handlers;
use crate::middleware::{auth_middleware, log_requests, rate_limit, RateLimiter};
use crate::state::AppState;

fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/events/{id}",
            get(handlers::events::get_event)
                .patch(handlers::events::update_event)
                .delete(handlers::events::delete_event),
        )
        .route(
            "/events/{id}/interest",
            post(handlers::participation::toggle_interest),
        )
        .route(
            "/events/{id}/availability",
            get(handlers::participation::get_availability)
                .post(handlers::participation::set_availability),
        )
        .route(
            "/events/{id}/performers",
            put(handlers::participation::set_performers),
        )
        .route(
            "/events/{id}/final-mix",
            get(handlers::events::get_final_mix)
                .put(handlers::events::set_final_mix)
                .delete(handlers::events::clear_final_mix),
        )
        .route(
            "/events/{id}/playlist",
            get(handlers::playlist::list_playlist).post(handlers::playlist::create_playlist_item),
        )
        .route(
            "/playlist/{id}",
            patch(handlers::playlist::update_playlist_item)
                .delete(handlers::playlist::delete_playlist_item),
        )
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/members",
            get(handlers::members::list_members).post(handlers::members::create_member),
        )
        .route(
            "/members/{id}",
            get(handlers::members::get_member)
                .patch(handlers::members::update_member)
                .delete(handlers::members::delete_member),
        )
        .route("/members/{id}/role", patch(handlers::members::set_member_role))
        .route(
            "/admin/eligible-performers",
            get(handlers::members::list_eligible_performers),
        )
}

fn join_routes() -> Router<AppState> {
    Router::new()
        .route("/join-requests", get(handlers::join::list_join_requests))
        .route(
            "/join-requests/{id}",
            post(handlers::join::review_join_request),
        )
}

fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/uploads/presign", post(handlers::media::presign_upload))
        .route(
            "/uploads/{event_id}/media/presign",
            post(handlers::media::presign_event_media),
        )
        .route(
            "/uploads/{event_id}/media",
            get(handlers::media::list_media).post(handlers::media::register_media),
        )
        .route(
            "/uploads/media/{media_id}",
            patch(handlers::media::update_media).delete(handlers::media::delete_media),
        )
}

/// Routes behind the sliding-window limiter
fn limited_routes(rate_limiter: RateLimiter) -> Router<AppState> {
    Router::new()
        .route("/join-team", post(handlers::join::submit_join_request))
        .route("/contactus", post(handlers::contact::contact_us))
        .layer(middleware::from_fn_with_state(rate_limiter, rate_limit))
}

fn cors_layer(settings: &Settings) -> Option<CorsLayer> {
    if let Some(origin) = settings.server.cors_allow_origin.as_deref() {
        return match origin.parse::<HeaderValue>() {
            Ok(value) => Some(
                CorsLayer::new()
                    .allow_origin(value)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
            Err(_) => {
                warn!(origin = origin, "Invalid CORS origin, skipping CORS layer");
                None
            }
        };
    }

    settings.is_development().then(CorsLayer::permissive)
}

/// Create the main application router
pub fn create_router(state: AppState, rate_limiter: RateLimiter) -> Router {
    let router = Router::new()
        .merge(event_routes())
        .merge(member_routes())
        .merge(join_routes())
        .merge(media_routes())
        .merge(limited_routes(rate_limiter))
        .route("/auth/debug", get(handlers::system::auth_debug))
        .route("/health", get(handlers::system::health))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(middleware::from_fn(log_requests));

    let router = match cors_layer(&state.settings) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}
