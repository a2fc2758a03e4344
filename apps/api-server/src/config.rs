//! Application configuration loaded from environment variables.

use std::env;

use inkwell_infra::JwtConfig;
#[cfg(feature = "postgres")]
use inkwell_infra::database::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            #[cfg(feature = "postgres")]
            database: env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
                url,
                max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
                min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
            }),
            jwt: JwtConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
