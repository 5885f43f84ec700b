//! Shared configuration types for tempocard services
//!
//! This crate provides the configuration surface for the data-access layer:
//! the Spotify Web API endpoints and the Redis cache connection. Everything
//! is driven by environment variables with sensible defaults.

mod error;
mod redis;
mod spotify;

pub use error::{ConfigError, ConfigResult};
pub use redis::RedisConfig;
pub use spotify::SpotifyConfig;

use std::env;

/// Common configuration shared by every consumer of the data-access layer
#[derive(Debug, Clone)]
pub struct CommonConfig {
    /// Spotify Web API configuration
    pub spotify: SpotifyConfig,

    /// Redis cache configuration
    pub redis: RedisConfig,
}

impl CommonConfig {
    /// Load common configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            spotify: SpotifyConfig::from_env()?,
            redis: RedisConfig::from_env()?,
        })
    }
}

/// Load `.env` files into the process environment, if present
///
/// Call once at startup before `CommonConfig::from_env`. Missing files are
/// not an error.
pub fn load_env_files() {
    let _ = dotenvy::dotenv();
}

/// Helper function to get a required environment variable
pub fn get_required_env(name: &str) -> ConfigResult<String> {
    env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
