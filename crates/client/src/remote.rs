//! Remote Favorite Service client.
//!
//! The account's favorite set lives on the server and is only ever changed
//! through two calls: toggle one slug, or union a batch of slugs into the set.
//! [`RemoteFavorites`] is the seam the controller depends on;
//! [`HttpRemoteFavorites`] speaks the site's HTTP contract.

use std::future::Future;

use hotel_favorites_core::FavoriteSlug;
use hotel_favorites_core::cookie::find_cookie;
use hotel_favorites_core::wire::{
    self, AJAX_HEADER, AJAX_HEADER_VALUE, CSRF_COOKIE, CSRF_HEADER, FavoritesResponse,
    SyncResponse, ToggleResponse,
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;

/// Errors talking to the Remote Favorite Service.
///
/// Every variant is a network failure from the user's point of view.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed or timed out.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// No `csrftoken` cookie is available to authorize a mutation.
    #[error("missing CSRF token")]
    MissingCsrfToken,
}

/// Authoritative per-account favorite set.
///
/// Callers guarantee only Customer actors reach these methods; the server
/// still enforces authorization on its own.
pub trait RemoteFavorites {
    /// Toggle `slug` on the account.
    ///
    /// Resolves to `true` if the slug is now favorited, `false` if it was removed.
    fn toggle(&self, slug: &FavoriteSlug) -> impl Future<Output = Result<bool, RemoteError>>;

    /// Union `slugs` into the account's favorites.
    ///
    /// Resolves to `true` if at least one slug was newly added.
    fn merge(&self, slugs: &[FavoriteSlug]) -> impl Future<Output = Result<bool, RemoteError>>;
}

/// HTTP implementation of [`RemoteFavorites`].
///
/// Sends the configured `Cookie` header with every request and echoes its
/// URL-decoded `csrftoken` in the `X-CSRFToken` header.
#[derive(Clone)]
pub struct HttpRemoteFavorites {
    client: reqwest::Client,
    base_url: Url,
    cookie: Option<SecretString>,
}

impl std::fmt::Debug for HttpRemoteFavorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRemoteFavorites")
            .field("base_url", &self.base_url.as_str())
            .field("cookie", &self.cookie.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl HttpRemoteFavorites {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            cookie: config.cookie.clone(),
        })
    }

    fn csrf_token(&self) -> Result<String, RemoteError> {
        self.cookie
            .as_ref()
            .and_then(|c| find_cookie(c.expose_secret(), CSRF_COOKIE))
            .ok_or(RemoteError::MissingCsrfToken)
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, RemoteError> {
        let url = self.base_url.join(path)?;
        let mut builder = self.client.request(method, url);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(reqwest::header::COOKIE, cookie.expose_secret());
        }
        Ok(builder)
    }

    fn post(&self, path: &str) -> Result<reqwest::RequestBuilder, RemoteError> {
        let token = self.csrf_token()?;
        Ok(self
            .request(reqwest::Method::POST, path)?
            .header(CSRF_HEADER, token))
    }

    /// Fetch the account's current favorites.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<FavoriteSlug>, RemoteError> {
        let builder = self.request(reqwest::Method::GET, wire::LIST_PATH)?;
        let body: FavoritesResponse = send_json(builder).await?;
        Ok(body.slugs)
    }
}

impl RemoteFavorites for HttpRemoteFavorites {
    #[instrument(skip(self, slug), fields(slug = %slug))]
    async fn toggle(&self, slug: &FavoriteSlug) -> Result<bool, RemoteError> {
        let builder = self
            .post(&wire::toggle_path(slug))?
            .header(AJAX_HEADER, AJAX_HEADER_VALUE);

        let body: ToggleResponse = send_json(builder).await?;
        debug!(added = body.added, "Remote toggle confirmed");
        Ok(body.added)
    }

    #[instrument(skip(self, slugs), fields(count = slugs.len()))]
    async fn merge(&self, slugs: &[FavoriteSlug]) -> Result<bool, RemoteError> {
        let builder = self.post(wire::SYNC_PATH)?.form(&wire::sync_form(slugs));

        let body: SyncResponse = send_json(builder).await?;
        debug!(added = body.added, "Remote merge confirmed");
        Ok(body.added)
    }
}

/// Send a request and decode a JSON body from a success response.
async fn send_json<T: DeserializeOwned>(
    builder: reqwest::RequestBuilder,
) -> Result<T, RemoteError> {
    let response = builder.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status(status.as_u16()));
    }

    // Read as text first so a malformed body surfaces as a parse error
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}
