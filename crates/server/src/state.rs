//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::config::ServerConfig;
use crate::middleware::{Account, SessionDirectory};
use crate::store::FavoriteStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone, Default)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Default)]
struct AppStateInner {
    favorites: FavoriteStore,
    sessions: SessionDirectory,
}

impl AppState {
    /// Create an empty state with no sessions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state holding the configured seed sessions.
    pub async fn from_config(config: &ServerConfig) -> Self {
        let state = Self::new();
        for seed in &config.seed_sessions {
            state
                .sessions()
                .insert(seed.token.expose_secret().to_string(), seed.account)
                .await;
        }
        tracing::info!(count = config.seed_sessions.len(), "Seed sessions loaded");
        state
    }

    /// Get a reference to the favorite sets.
    #[must_use]
    pub fn favorites(&self) -> &FavoriteStore {
        &self.inner.favorites
    }

    /// Get a reference to the session directory.
    #[must_use]
    pub fn sessions(&self) -> &SessionDirectory {
        &self.inner.sessions
    }

    /// Sign `account` in and return its session token.
    pub async fn issue_session(&self, account: Account) -> String {
        self.sessions().issue(account).await
    }
}
