//! Wire contract of the Remote Favorite Service.
//!
//! # Endpoints
//!
//! ```text
//! POST /customers/favorite/{slug}/   - Toggle one slug      -> {"added": bool}
//! POST /customers/sync_favorites/    - Union slugs[] (form) -> {"added": bool}
//! GET  /customers/favorites/         - List favorites       -> {"slugs": [...]}
//! ```
//!
//! Mutating requests carry the CSRF token in [`CSRF_HEADER`]. The toggle
//! request is additionally marked as AJAX with [`AJAX_HEADER`].

use serde::{Deserialize, Serialize};

use crate::FavoriteSlug;

/// Header carrying the CSRF token.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Header marking a request as issued from page script.
pub const AJAX_HEADER: &str = "X-Requested-With";

/// Value of [`AJAX_HEADER`].
pub const AJAX_HEADER_VALUE: &str = "XMLHttpRequest";

/// Cookie holding the CSRF token (URL-encoded).
pub const CSRF_COOKIE: &str = "csrftoken";

/// Cookie identifying the account session.
pub const SESSION_COOKIE: &str = "sessionid";

/// Repeated form field of the sync request.
pub const SYNC_FIELD: &str = "slugs[]";

/// Path of the bulk-merge endpoint.
pub const SYNC_PATH: &str = "/customers/sync_favorites/";

/// Path of the favorites listing endpoint.
pub const LIST_PATH: &str = "/customers/favorites/";

/// Path of the toggle endpoint for `slug`.
#[must_use]
pub fn toggle_path(slug: &FavoriteSlug) -> String {
    format!("/customers/favorite/{slug}/")
}

/// Response of the toggle endpoint.
///
/// `added` is `true` when the slug is now favorited, `false` when it was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub added: bool,
}

/// Response of the sync endpoint.
///
/// `added` is `true` when the union inserted at least one new slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub added: bool,
}

/// Response of the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub slugs: Vec<FavoriteSlug>,
}

/// Build the form pairs for a sync request body.
#[must_use]
pub fn sync_form<'a>(slugs: &'a [FavoriteSlug]) -> Vec<(&'static str, &'a str)> {
    slugs.iter().map(|s| (SYNC_FIELD, s.as_str())).collect()
}
