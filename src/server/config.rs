use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
/// Top of every hour.
const DEFAULT_RECOMMENDATION_REFRESH_CRON: &str = "0 0 * * * *";

pub struct Config {
    pub database_url: String,

    pub host: String,
    pub port: u16,

    /// Marks the session cookie `Secure`; enable behind HTTPS.
    pub session_secure: bool,
    /// Origin allowed by CORS. `None` allows any origin.
    pub allowed_origin: Option<String>,

    /// Six-field cron expression for the recommendation refresh job.
    pub recommendation_refresh_cron: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_env("PORT", DEFAULT_PORT)?,
            session_secure: parse_env("SESSION_SECURE", false)?,
            allowed_origin: std::env::var("ALLOWED_ORIGIN").ok(),
            recommendation_refresh_cron: std::env::var("RECOMMENDATION_REFRESH_CRON")
                .unwrap_or_else(|_| DEFAULT_RECOMMENDATION_REFRESH_CRON.to_string()),
        })
    }

    /// Socket address string the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Reads an optional variable, falling back to `default` when unset.
fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
