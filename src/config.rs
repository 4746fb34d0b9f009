//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `API_KEY` (required): shared secret clients send as `x-api-key` or `api_key`
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 5000
/// - `DATABASE_CA_CERT` (optional): CA bundle for the database TLS channel, defaults to `./certs/ca.pem`
/// - `STATIC_DIR` (optional): directory served for unmatched paths, defaults to `public`
/// - `CREATE_TABLE_ON_STARTUP` (optional): run the table initializer before serving, defaults to false
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    pub api_key: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_ca_cert")]
    pub database_ca_cert: PathBuf,

    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default)]
    pub create_table_on_startup: bool,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] envy::Error),

    #[error("API_KEY must not be empty")]
    EmptyApiKey,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    5000
}

fn default_ca_cert() -> PathBuf {
    PathBuf::from("./certs/ca.pem")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL, API_KEY)
    /// - Environment variable values cannot be parsed into expected types
    /// - API_KEY is set but empty
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        Self::from_iter(std::env::vars())
    }

    /// Build configuration from explicit key/value pairs.
    ///
    /// Field names are matched case-insensitively: `database_url` <- `DATABASE_URL`.
    pub fn from_iter<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would let an absent client key match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(())
    }
}
