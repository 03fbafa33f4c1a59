//! Rate limiting middleware
//!
//! In-memory sliding window keyed by client IP, applied to the public
//! write endpoints (join requests and the contact form). Proxy headers are
//! honored before falling back to the socket address.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;
use crate::utils::errors::{Result, StageCrewError};

/// Sliding-window entry for one client
#[derive(Debug, Clone)]
struct RateLimitEntry {
    requests: Vec<Instant>,
    burst_used: u32,
    last_reset: Instant,
}

impl RateLimitEntry {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
            burst_used: 0,
            last_reset: Instant::now(),
        }
    }

    /// Drop requests that fell out of the window
    fn cleanup(&mut self, window: Duration) {
        let cutoff = Instant::now() - window;
        self.requests.retain(|&time| time > cutoff);

        if self.last_reset.elapsed() > window {
            self.burst_used = 0;
            self.last_reset = Instant::now();
        }
    }

    fn is_allowed(&mut self, max_requests: u32, burst_allowance: u32, window: Duration) -> bool {
        self.cleanup(window);

        if (self.requests.len() as u32) < max_requests {
            return true;
        }

        if self.burst_used < burst_allowance {
            self.burst_used += 1;
            return true;
        }

        false
    }

    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }
}

/// Per-IP rate limiter shared across requests
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
}

impl RateLimiter {
    /// Create a new RateLimiter instance
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn window(&self) -> Duration {
        Duration::from_secs(self.config.window_seconds)
    }

    /// Check one request against the window; records it when allowed
    pub fn check(&self, client: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(client.to_string())
            .or_insert_with(RateLimitEntry::new);

        if entry.is_allowed(
            self.config.max_requests,
            self.config.burst_allowance,
            self.window(),
        ) {
            entry.record_request();
            debug!(client = client, "Rate limit check passed");
            Ok(())
        } else {
            warn!(client = client, "Rate limit exceeded");
            Err(StageCrewError::RateLimitExceeded)
        }
    }

    /// Drop clients whose whole history fell out of the window
    pub fn cleanup_old_entries(&self) {
        let mut entries = self.entries.lock().unwrap();
        let cutoff = Instant::now() - self.window() * 2;
        entries.retain(|_, entry| entry.requests.iter().any(|&time| time > cutoff));
        debug!(remaining_entries = entries.len(), "Cleaned up rate limit entries");
    }
}

/// Best-effort client address: proxy headers first, socket address last
fn client_address(request: &Request<Body>) -> String {
    let remote_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string());

    request
        .headers()
        .get("x-real-ip")
        .and_then(|header| header.to_str().ok())
        .or_else(|| {
            request
                .headers()
                .get("x-forwarded-for")
                .and_then(|header| header.to_str().ok())
                .and_then(|value| value.split(',').find(|ip| !ip.trim().is_empty()))
        })
        .map(|ip| ip.trim().to_string())
        .or(remote_ip)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware entry point for the rate-limited routes
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let client = client_address(&request);
    limiter.check(&client)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(max_requests: u32, burst_allowance: u32) -> RateLimitConfig {
        RateLimitConfig {
            max_requests,
            window_seconds: 60,
            burst_allowance,
        }
    }

    #[test]
    fn test_rate_limit_basic() {
        let limiter = RateLimiter::new(test_config(3, 1));

        assert!(limiter.check("10.0.0.1").is_ok());
        assert!(limiter.check("10.0.0.1").is_ok());
        assert!(limiter.check("10.0.0.1").is_ok());
        // burst allowance absorbs one more
        assert!(limiter.check("10.0.0.1").is_ok());
        assert!(limiter.check("10.0.0.1").is_err());
    }

    #[test]
    fn test_clients_are_tracked_separately() {
        let limiter = RateLimiter::new(test_config(1, 0));

        assert!(limiter.check("10.0.0.1").is_ok());
        assert!(limiter.check("10.0.0.1").is_err());
        assert!(limiter.check("10.0.0.2").is_ok());
    }

    #[test]
    fn test_cleanup_keeps_recent_entries() {
        let limiter = RateLimiter::new(test_config(5, 0));
        limiter.check("10.0.0.1").unwrap();

        limiter.cleanup_old_entries();
        assert_eq!(limiter.entries.lock().unwrap().len(), 1);
    }
}
