//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FAVORITES_SERVER_HOST` - Bind address (default: 127.0.0.1)
//! - `FAVORITES_SERVER_PORT` - Listen port (default: 8000)
//! - `FAVORITES_SEED_SESSIONS` - Pre-issued sessions,
//!   `token=customer:ID,token=owner:ID`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use crate::middleware::auth::{Account, AccountId, AccountKind};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// A session token issued ahead of time.
#[derive(Clone)]
pub struct SeedSession {
    pub token: SecretString,
    pub account: Account,
}

impl std::fmt::Debug for SeedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedSession")
            .field("token", &"[REDACTED]")
            .field("account", &self.account)
            .finish()
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sessions available at startup
    pub seed_sessions: Vec<SeedSession>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            seed_sessions: Vec::new(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("FAVORITES_SERVER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("FAVORITES_SERVER_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("FAVORITES_SERVER_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("FAVORITES_SERVER_PORT".to_string(), e.to_string())
            })?;
        let seed_sessions = get_optional_env("FAVORITES_SEED_SESSIONS")
            .map(|raw| parse_seed_sessions(&raw))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            seed_sessions,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse `token=kind:id` entries separated by commas.
fn parse_seed_sessions(raw: &str) -> Result<Vec<SeedSession>, ConfigError> {
    let invalid = |entry: &str, reason: &str| {
        ConfigError::InvalidEnvVar(
            "FAVORITES_SEED_SESSIONS".to_string(),
            format!("`{entry}`: {reason}"),
        )
    };

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (token, account) = entry
                .split_once('=')
                .ok_or_else(|| invalid(entry, "expected token=kind:id"))?;
            if token.is_empty() {
                return Err(invalid(entry, "empty token"));
            }
            let (kind, id) = account
                .split_once(':')
                .ok_or_else(|| invalid(entry, "expected kind:id"))?;
            let kind = match kind {
                "customer" => AccountKind::Customer,
                "owner" => AccountKind::Owner,
                _ => return Err(invalid(entry, "kind must be customer or owner")),
            };
            let id = id
                .parse::<u64>()
                .map_err(|_| invalid(entry, "id must be a number"))?;

            Ok(SeedSession {
                token: SecretString::from(token.to_string()),
                account: Account {
                    id: AccountId(id),
                    kind,
                },
            })
        })
        .collect()
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_parse_seed_sessions() {
        let sessions = parse_seed_sessions("abc=customer:1, def=owner:2").unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].token.expose_secret(), "abc");
        assert_eq!(sessions[0].account.kind, AccountKind::Customer);
        assert_eq!(sessions[0].account.id, AccountId(1));
        assert_eq!(sessions[1].account.kind, AccountKind::Owner);
    }

    #[test]
    fn test_parse_seed_sessions_skips_empty_entries() {
        assert!(parse_seed_sessions("").unwrap().is_empty());
        assert_eq!(parse_seed_sessions("a=customer:1,,").unwrap().len(), 1);
    }

    #[test]
    fn test_parse_seed_sessions_rejects_malformed() {
        for raw in [
            "abc",
            "=customer:1",
            "abc=customer",
            "abc=admin:1",
            "abc=customer:x",
        ] {
            let err = parse_seed_sessions(raw).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)), "{raw}");
        }
    }

    #[test]
    fn test_seed_session_debug_redacts_token() {
        let sessions = parse_seed_sessions("topsecret=customer:1").unwrap();
        let debug_output = format!("{sessions:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("topsecret"));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }
}
