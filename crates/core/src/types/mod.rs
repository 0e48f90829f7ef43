//! Core types for hotel favorites.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod identity;
pub mod severity;
pub mod slug;

pub use identity::IdentityContext;
pub use severity::Severity;
pub use slug::{FavoriteSlug, SlugError};
