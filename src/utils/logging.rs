//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the StageCrew application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// Returns the appender guard when file logging is enabled; the caller must
/// hold it for the lifetime of the process or buffered lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let mut guard = None;
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    layers.push(EnvFilter::new(&config.level).boxed());

    if config.format == "json" {
        layers.push(fmt::layer().json().with_writer(std::io::stdout).boxed());
    } else {
        layers.push(fmt::layer().with_writer(std::io::stdout).boxed());
    }

    if let Some(dir) = &config.file_path {
        let file_appender = tracing_appender::rolling::daily(dir, "stagecrew.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        layers.push(fmt::layer().with_ansi(false).with_writer(non_blocking).boxed());
        guard = Some(file_guard);
    }

    tracing_subscriber::registry().with(layers).init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Audit log for admin mutations; kept at `warn` so these lines survive
/// production filter levels
pub fn log_admin_action(admin_id: uuid::Uuid, action: &str, target: &str) {
    warn!(
        admin_id = %admin_id,
        action = action,
        target = target,
        "Admin action performed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;

    #[test]
    fn test_init_logging_with_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
            file_path: Some(dir.path().to_string_lossy().into_owned()),
        };

        let guard = init_logging(&config).unwrap();
        assert!(guard.is_some());
    }
}
