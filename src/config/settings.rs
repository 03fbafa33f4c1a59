//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub email: EmailConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub cors_allow_origin: Option<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

/// Session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_leeway_seconds: u64,
}

/// Object storage collaborator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    pub public_base_url: String,
    pub avatar_max_upload_mb: u64,
    pub media_max_upload_mb: u64,
    pub presign_expiry_seconds: u64,
    pub timeout_seconds: u64,
}

/// Outbound email relay configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub endpoint: String,
    pub from_address: String,
    pub admin_address: String,
    pub timeout_seconds: u64,
    pub enabled: bool,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_seconds: u64,
    pub burst_allowance: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("STAGECREW").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::StageCrewError> {
        super::validation::validate_settings(self)
    }

    /// Whether the server runs with development conveniences enabled
    pub fn is_development(&self) -> bool {
        self.server.environment == "development"
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 4000,
                environment: "development".to_string(),
                cors_allow_origin: None,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/stagecrew".to_string(),
                max_connections: 10,
                min_connections: 1,
                connect_timeout_seconds: 30,
                idle_timeout_seconds: 600,
            },
            auth: AuthConfig {
                jwt_secret: "dev-secret-change-me".to_string(),
                token_leeway_seconds: 30,
            },
            storage: StorageConfig {
                endpoint: "http://localhost:9090".to_string(),
                bucket: "stagecrew-media".to_string(),
                region: "us-east-1".to_string(),
                public_base_url: "https://stagecrew-media.s3.us-east-1.amazonaws.com".to_string(),
                avatar_max_upload_mb: 5,
                media_max_upload_mb: 100,
                presign_expiry_seconds: 300,
                timeout_seconds: 10,
            },
            email: EmailConfig {
                endpoint: "http://localhost:9091".to_string(),
                from_address: "noreply@stagecrew.team".to_string(),
                admin_address: "admin@stagecrew.team".to_string(),
                timeout_seconds: 10,
                enabled: true,
            },
            rate_limit: RateLimitConfig {
                max_requests: 10,
                window_seconds: 600,
                burst_allowance: 0,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file_path: None,
            },
        }
    }
}
