//! Hotel Favorites Core - Shared types library.
//!
//! This crate provides common types used across all hotel favorites components:
//! - `client` - Favorite toggling, local wishlist and login sync
//! - `server` - Reference implementation of the favorites endpoints
//! - `cli` - Terminal host for the client
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated slugs, actor identity, notification severity
//! - [`wire`] - Request/response bodies and endpoint paths
//! - [`cookie`] - `Cookie` header parsing for the CSRF token

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cookie;
pub mod types;
pub mod wire;

pub use types::*;
