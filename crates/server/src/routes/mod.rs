//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Health check
//!
//! # Favorites (customer session required)
//! POST /customers/favorite/{slug}/   - Toggle one favorite (CSRF)
//! POST /customers/sync_favorites/    - Merge a guest wishlist (CSRF, form)
//! GET  /customers/favorites/         - List favorites
//! ```

pub mod favorites;

use axum::{
    Router,
    routing::{get, post},
};
use hotel_favorites_core::wire::{LIST_PATH, SYNC_PATH};

use crate::state::AppState;

/// Create the favorites router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers/favorite/{slug}/", post(favorites::toggle))
        .route(SYNC_PATH, post(favorites::sync))
        .route(LIST_PATH, get(favorites::list))
}
