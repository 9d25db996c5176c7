//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SUCRE_API_BASE_URL` - Base URL of the store API
//!   (e.g., `http://localhost:8080/api`)
//!
//! ## Optional
//! - `SUCRE_STORAGE_DIR` - Directory for durable client records
//!   (default: `.sucre-store`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_STORAGE_DIR: &str = ".sucre-store";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Sucre Store client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the auth endpoints hang off of
    pub api_base_url: Url,
    /// Directory for durable records (cart, legacy credential)
    pub storage_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables, honoring a local
    /// `.env` file when present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when a required variable is
    /// absent, or `ConfigError::InvalidEnvVar` when a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through a variable lookup, so tests can supply
    /// values without touching the process environment.
    ///
    /// # Errors
    ///
    /// Same contract as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("SUCRE_API_BASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("SUCRE_API_BASE_URL".to_owned()))?;
        let api_base_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SUCRE_API_BASE_URL".to_owned(), e.to_string())
        })?;

        let storage_dir = lookup("SUCRE_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        Ok(Self {
            api_base_url,
            storage_dir,
        })
    }
}
