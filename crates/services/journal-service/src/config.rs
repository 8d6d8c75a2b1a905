//! Journal service configuration.

use std::env;

use common::{AppError, AppResult, DatabaseConfig, JwtConfig};
use domain::DEFAULT_JWT_EXPIRATION_HOURS;

/// Journal service configuration.
#[derive(Debug, Clone, Default)]
pub struct JournalServiceConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl JournalServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Missing or too short JWT secret.
    pub fn from_env() -> AppResult<Self> {
        let database = Self::database_from_env();

        let secret = env::var("JWT_SECRET")
            .or_else(|_| env::var("SECRET_KEY"))
            .map_err(|_| AppError::internal("JWT_SECRET (or SECRET_KEY) must be set"))?;
        let jwt = JwtConfig {
            secret,
            expiration_hours: parse_var("JWT_EXPIRATION_HOURS")
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
        };
        jwt.validate()?;

        Ok(Self { database, jwt })
    }

    /// Database settings only, for commands that never issue tokens.
    pub fn database_from_env() -> DatabaseConfig {
        let defaults = DatabaseConfig::default();
        DatabaseConfig {
            url: env::var("JOURNAL_SERVICE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or(defaults.url),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.max_connections),
            min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                .unwrap_or(defaults.min_connections),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
