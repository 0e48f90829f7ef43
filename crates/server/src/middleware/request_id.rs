//! Request IDs for correlating log lines and Sentry events.
//!
//! An upstream `x-request-id` is kept when it is a short token, anything
//! else is replaced with a fresh UUID. The ID lands on the request span and
//! the response.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_LEN: usize = 128;

/// Correlation ID of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(HeaderValue);

impl RequestId {
    /// Reuse the upstream ID in `headers` if it is acceptable, else mint one.
    pub fn resolve(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .filter(|value| is_token(value.as_bytes()))
            .cloned()
            .map_or_else(Self::generate, Self)
    }

    fn generate() -> Self {
        // A hyphenated UUID is always a valid header value
        let id = Uuid::new_v4().hyphenated().to_string();
        Self(HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown")))
    }

    /// The ID as text.
    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or_default()
    }
}

fn is_token(id: &[u8]) -> bool {
    !id.is_empty()
        && id.len() <= MAX_LEN
        && id.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
}

/// Record the request ID on the current span and echo it in the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let id = RequestId::resolve(request.headers());

    Span::current().record("request_id", id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", id.as_str()));

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, id.0);
    response
}
