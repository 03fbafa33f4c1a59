//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{StageCrewError, Result};
use super::Settings;

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(settings)?;
    validate_storage_config(&settings.storage)?;
    validate_email_config(&settings.email)?;
    validate_rate_limit_config(&settings.rate_limit)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(StageCrewError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(StageCrewError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    if config.environment.is_empty() {
        return Err(StageCrewError::Config(
            "Server environment is required".to_string()
        ));
    }

    if let Some(ref origin) = config.cors_allow_origin {
        url::Url::parse(origin).map_err(|e| {
            StageCrewError::Config(format!("Invalid CORS origin '{}': {}", origin, e))
        })?;
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(StageCrewError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(StageCrewError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(StageCrewError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.connect_timeout_seconds == 0 {
        return Err(StageCrewError::Config(
            "Database connect timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate session token configuration
fn validate_auth_config(settings: &Settings) -> Result<()> {
    let config = &settings.auth;

    if config.jwt_secret.is_empty() {
        return Err(StageCrewError::Config(
            "JWT secret is required".to_string()
        ));
    }

    if !settings.is_development() && config.jwt_secret == DEV_JWT_SECRET {
        return Err(StageCrewError::Config(
            "The development JWT secret cannot be used outside development".to_string()
        ));
    }

    Ok(())
}

/// Validate object storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    url::Url::parse(&config.endpoint).map_err(|e| {
        StageCrewError::Config(format!("Invalid storage endpoint '{}': {}", config.endpoint, e))
    })?;

    url::Url::parse(&config.public_base_url).map_err(|e| {
        StageCrewError::Config(format!(
            "Invalid storage public base URL '{}': {}",
            config.public_base_url, e
        ))
    })?;

    if config.bucket.is_empty() {
        return Err(StageCrewError::Config(
            "Storage bucket is required".to_string()
        ));
    }

    if config.avatar_max_upload_mb == 0 || config.media_max_upload_mb == 0 {
        return Err(StageCrewError::Config(
            "Upload size limits must be greater than 0".to_string()
        ));
    }

    if config.presign_expiry_seconds == 0 {
        return Err(StageCrewError::Config(
            "Presign expiry must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate outbound email configuration
fn validate_email_config(config: &super::EmailConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    url::Url::parse(&config.endpoint).map_err(|e| {
        StageCrewError::Config(format!("Invalid email endpoint '{}': {}", config.endpoint, e))
    })?;

    if !config.from_address.contains('@') {
        return Err(StageCrewError::Config(format!(
            "Invalid email from address: {}",
            config.from_address
        )));
    }

    if !config.admin_address.contains('@') {
        return Err(StageCrewError::Config(format!(
            "Invalid email admin address: {}",
            config.admin_address
        )));
    }

    Ok(())
}

/// Validate rate limiting configuration
fn validate_rate_limit_config(config: &super::RateLimitConfig) -> Result<()> {
    if config.max_requests == 0 {
        return Err(StageCrewError::Config(
            "Rate limit max requests must be greater than 0".to_string()
        ));
    }

    if config.window_seconds == 0 {
        return Err(StageCrewError::Config(
            "Rate limit window must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(StageCrewError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(StageCrewError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.format.as_str()) {
        return Err(StageCrewError::Config(
            format!("Invalid log format: {}. Valid formats: {:?}", config.format, valid_formats)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_production_rejects_dev_secret() {
        let mut settings = Settings::default();
        settings.server.environment = "production".to_string();
        assert_matches!(
            validate_settings(&settings),
            Err(StageCrewError::Config(_))
        );

        settings.auth.jwt_secret = "a-real-secret".to_string();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = Settings::default();
        settings.logging.level = "loud".to_string();
        assert_matches!(
            validate_settings(&settings),
            Err(StageCrewError::Config(_))
        );
    }

    #[test]
    fn test_invalid_storage_endpoint_rejected() {
        let mut settings = Settings::default();
        settings.storage.endpoint = "not a url".to_string();
        assert_matches!(
            validate_settings(&settings),
            Err(StageCrewError::Config(_))
        );
    }

    #[test]
    fn test_connection_bounds_checked() {
        let mut settings = Settings::default();
        settings.database.min_connections = 20;
        assert_matches!(
            validate_settings(&settings),
            Err(StageCrewError::Config(_))
        );
    }
}
