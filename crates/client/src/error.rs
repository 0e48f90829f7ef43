//! Errors returned by favorite operations.
//!
//! Every error is local and non-fatal. By the time one is returned the
//! visitor has already been notified where appropriate, and the page is
//! still usable.

use hotel_favorites_core::FavoriteSlug;
use thiserror::Error;

use crate::remote::RemoteError;
use crate::storage::StorageError;
use crate::view::CardId;

/// Favorite operation error.
#[derive(Debug, Error)]
pub enum FavoriteError {
    /// The actor is not allowed to use favorites.
    #[error("favorites are not available to owner accounts")]
    PermissionDenied,

    /// The Remote Favorite Service could not be reached or answered badly.
    #[error("remote favorites request failed: {0}")]
    Network(#[from] RemoteError),

    /// The local wishlist could not be written.
    #[error("local wishlist could not be saved: {0}")]
    Storage(#[from] StorageError),

    /// No card with this id is on the page.
    #[error("no favorite control {0} on the page")]
    ControlNotFound(CardId),

    /// The card's control is bound to a different slug.
    #[error("favorite control {card} is bound to {bound}, not {requested}")]
    ControlMismatch {
        card: CardId,
        bound: FavoriteSlug,
        requested: FavoriteSlug,
    },

    /// A toggle for this slug is still waiting for the server.
    #[error("a favorite request for {0} is already in flight")]
    InFlight(FavoriteSlug),
}
