//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FAVORITES_BASE_URL` - Base URL of the site serving the favorites API
//!
//! ## Optional
//! - `FAVORITES_COOKIE` - `Cookie` header of the signed-in session
//!   (e.g. `sessionid=...; csrftoken=...`). Absent for guests.
//! - `FAVORITES_STORAGE_DIR` - Directory for the local wishlist
//!   (default: `<data-local-dir>/hotel-favorites`)
//! - `FAVORITES_REQUEST_TIMEOUT_SECS` - Timeout per remote request (default: 15)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: &str = "15";
const STORAGE_DIR_NAME: &str = "hotel-favorites";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Favorites client configuration.
///
/// Implements `Debug` manually to redact the session cookie.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL the API paths are resolved against
    pub base_url: Url,
    /// Session cookie header sent with every request
    pub cookie: Option<SecretString>,
    /// Directory holding the local wishlist
    pub storage_dir: PathBuf,
    /// Timeout applied to each remote request
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("cookie", &self.cookie.as_ref().map(|_| "[REDACTED]"))
            .field("storage_dir", &self.storage_dir)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("FAVORITES_BASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("FAVORITES_BASE_URL".to_string()))?;
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("FAVORITES_BASE_URL".to_string(), e.to_string())
        })?;

        let cookie = lookup("FAVORITES_COOKIE")
            .filter(|c| !c.trim().is_empty())
            .map(SecretString::from);

        let storage_dir = match lookup("FAVORITES_STORAGE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .map(|d| d.join(STORAGE_DIR_NAME))
                .ok_or_else(|| ConfigError::MissingEnvVar("FAVORITES_STORAGE_DIR".to_string()))?,
        };

        let timeout_secs = lookup("FAVORITES_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "FAVORITES_REQUEST_TIMEOUT_SECS".to_string(),
                    e.to_string(),
                )
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "FAVORITES_REQUEST_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            cookie,
            storage_dir,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
