//! HTTP middleware and extractors.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (request span with `request_id`)
//! 3. Request ID (add unique ID to each request)

pub mod auth;
pub mod request_id;

pub use auth::{Account, AccountId, AccountKind, CsrfVerified, RequireCustomer, SessionDirectory};
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
