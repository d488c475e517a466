//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::database::DatabaseConfig;
use blog_infra::{BackupSettings, RateLimitSettings};

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub rate_limit: RateLimitSettings,
    pub backup: BackupSettings,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            rate_limit: RateLimitSettings::from_env(),
            backup: BackupSettings::from_env(),
            telemetry: TelemetryConfig::from_env(),
        }
    }
}
