//! Integration tests for hotel favorites.
//!
//! Each test boots the favorites server on an ephemeral port inside the test
//! runtime and drives it through the real HTTP client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hotel-favorites-integration-tests
//! ```

use std::time::Duration;

use axum::Router;
use hotel_favorites_client::ClientConfig;
use hotel_favorites_server::AppState;
use hotel_favorites_server::middleware::{Account, AccountId, AccountKind};
use secrecy::SecretString;
use tokio::task::JoinHandle;
use url::Url;

/// CSRF token used by every test session, URL-encoded as a browser would.
pub const CSRF_TOKEN: &str = "t0k+en/=";

/// A favorites server running for the duration of a test.
pub struct TestServer {
    pub base_url: Url,
    pub state: AppState,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = AppState::new();
        let (base_url, handle) = serve(hotel_favorites_server::app(state.clone())).await;
        Self {
            base_url,
            state,
            handle,
        }
    }

    /// Sign an account in and return the browser `Cookie` header for it.
    pub async fn sign_in(&self, id: u64, kind: AccountKind) -> String {
        let token = self
            .state
            .issue_session(Account {
                id: AccountId(id),
                kind,
            })
            .await;
        format!(
            "sessionid={token}; csrftoken={}",
            urlencode(CSRF_TOKEN)
        )
    }

    /// Client configuration pointing at this server.
    #[must_use]
    pub fn config(&self, cookie: Option<String>) -> ClientConfig {
        client_config(&self.base_url, cookie, Duration::from_secs(5))
    }

    /// Absolute URL of `path` on this server.
    ///
    /// # Panics
    ///
    /// Panics if `path` cannot be joined onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("Invalid path")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A hand-written router standing in for a misbehaving favorites server.
pub struct StubServer {
    pub base_url: Url,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Serve `router` on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(router: Router) -> Self {
        let (base_url, handle) = serve(router).await;
        Self { base_url, handle }
    }

    /// Client configuration for a signed-in customer with a short timeout.
    #[must_use]
    pub fn config(&self, request_timeout: Duration) -> ClientConfig {
        let cookie = format!("sessionid=stub; csrftoken={}", urlencode(CSRF_TOKEN));
        client_config(&self.base_url, Some(cookie), request_timeout)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(router: Router) -> (Url, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let base_url = Url::parse(&format!("http://{addr}")).expect("Invalid base URL");
    (base_url, handle)
}

fn client_config(base_url: &Url, cookie: Option<String>, request_timeout: Duration) -> ClientConfig {
    ClientConfig {
        base_url: base_url.clone(),
        cookie: cookie.map(SecretString::from),
        storage_dir: std::env::temp_dir(),
        request_timeout,
    }
}

fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
