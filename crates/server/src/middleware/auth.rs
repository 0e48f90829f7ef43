//! Session lookup and request extractors.
//!
//! Sessions are opaque tokens carried in the `sessionid` cookie. Logging in
//! is handled elsewhere; this server only resolves tokens it was given at
//! startup or through [`AppState::issue_session`](crate::state::AppState::issue_session).

use std::collections::HashMap;
use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use hotel_favorites_core::cookie::find_cookie;
use hotel_favorites_core::wire::{CSRF_COOKIE, CSRF_HEADER, SESSION_COOKIE};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Numeric account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of a signed-in account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Customer,
    Owner,
}

/// A signed-in account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub kind: AccountKind,
}

/// Session tokens mapped to the account they sign in.
#[derive(Debug, Default)]
pub struct SessionDirectory {
    sessions: RwLock<HashMap<String, Account>>,
}

impl SessionDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` for `account`, replacing any previous binding.
    pub async fn insert(&self, token: String, account: Account) {
        self.sessions.write().await.insert(token, account);
    }

    /// Create a fresh token for `account`.
    pub async fn issue(&self, account: Account) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.insert(token.clone(), account).await;
        token
    }

    /// Resolve a token.
    pub async fn get(&self, token: &str) -> Option<Account> {
        self.sessions.read().await.get(token).copied()
    }
}

/// Extractor that requires a signed-in customer.
///
/// Rejects anonymous requests with 401 and owner accounts with 403.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireCustomer(account): RequireCustomer) -> String {
///     format!("customer {}", account.id)
/// }
/// ```
pub struct RequireCustomer(pub Account);

impl FromRequestParts<AppState> for RequireCustomer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = request_cookie(parts, SESSION_COOKIE)
            .ok_or_else(|| AppError::Unauthorized("sign in required".to_string()))?;

        let account = state
            .sessions()
            .get(&token)
            .await
            .ok_or_else(|| AppError::Unauthorized("session expired".to_string()))?;

        set_sentry_user(&account.id);

        match account.kind {
            AccountKind::Customer => Ok(Self(account)),
            AccountKind::Owner => {
                tracing::info!(account_id = %account.id, "Owner account denied favorites");
                Err(AppError::Forbidden(
                    "favorites are only available to customers".to_string(),
                ))
            }
        }
    }
}

/// Extractor that requires the CSRF header to match the CSRF cookie.
pub struct CsrfVerified;

impl<S> FromRequestParts<S> for CsrfVerified
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie = request_cookie(parts, CSRF_COOKIE);
        let header = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|h| h.to_str().ok());

        match (cookie.as_deref(), header) {
            (Some(cookie), Some(header)) if !cookie.is_empty() && cookie == header => Ok(Self),
            _ => {
                tracing::warn!("CSRF verification failed");
                Err(AppError::Forbidden("CSRF verification failed".to_string()))
            }
        }
    }
}

/// Find a cookie across all `Cookie` headers of a request.
fn request_cookie(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| find_cookie(header, name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(cookie: Option<&str>, csrf: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(csrf) = csrf {
            builder = builder.header(CSRF_HEADER, csrf);
        }
        builder.body(()).unwrap().into_parts().0
    }

    async fn customer(state: &AppState, parts: &mut Parts) -> Result<Account, AppError> {
        RequireCustomer::from_request_parts(parts, state)
            .await
            .map(|RequireCustomer(account)| account)
    }

    #[tokio::test]
    async fn test_issued_session_resolves() {
        let directory = SessionDirectory::new();
        let account = Account {
            id: AccountId(7),
            kind: AccountKind::Customer,
        };
        let token = directory.issue(account).await;

        assert_eq!(directory.get(&token).await, Some(account));
        assert_eq!(directory.get("unknown").await, None);
    }

    #[tokio::test]
    async fn test_require_customer() {
        let state = AppState::new();
        let customer_token = state
            .issue_session(Account {
                id: AccountId(1),
                kind: AccountKind::Customer,
            })
            .await;
        let owner_token = state
            .issue_session(Account {
                id: AccountId(2),
                kind: AccountKind::Owner,
            })
            .await;

        let mut p = parts(Some(&format!("sessionid={customer_token}")), None);
        assert_eq!(customer(&state, &mut p).await.unwrap().id, AccountId(1));

        let mut p = parts(Some(&format!("sessionid={owner_token}")), None);
        assert!(matches!(
            customer(&state, &mut p).await,
            Err(AppError::Forbidden(_))
        ));

        let mut p = parts(None, None);
        assert!(matches!(
            customer(&state, &mut p).await,
            Err(AppError::Unauthorized(_))
        ));

        let mut p = parts(Some("sessionid=bogus"), None);
        assert!(matches!(
            customer(&state, &mut p).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_csrf_header_must_match_decoded_cookie() {
        let mut p = parts(Some("csrftoken=a%2Bb"), Some("a+b"));
        assert!(CsrfVerified::from_request_parts(&mut p, &()).await.is_ok());

        let mut p = parts(Some("csrftoken=abc"), Some("xyz"));
        assert!(CsrfVerified::from_request_parts(&mut p, &()).await.is_err());

        let mut p = parts(Some("csrftoken=abc"), None);
        assert!(CsrfVerified::from_request_parts(&mut p, &()).await.is_err());

        let mut p = parts(None, Some("abc"));
        assert!(CsrfVerified::from_request_parts(&mut p, &()).await.is_err());

        let mut p = parts(Some("csrftoken="), Some(""));
        assert!(CsrfVerified::from_request_parts(&mut p, &()).await.is_err());
    }
}
