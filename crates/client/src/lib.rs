//! Hotel Favorites client library.
//!
//! Lets a visitor favorite hotels before signing in and carries those
//! favorites over to their account afterwards.
//!
//! # Architecture
//!
//! - [`Favorites`] is created once per page load with the visitor's
//!   [`IdentityContext`](hotel_favorites_core::IdentityContext), the rendered
//!   [`PageView`], and three collaborators behind traits:
//!   - [`KeyValueStore`] - device-local persistence (the `wishlist` key)
//!   - [`RemoteFavorites`] - the account's server-side favorite set
//!   - [`Notifier`] - transient user notifications
//! - Guests toggle the local wishlist synchronously and optimistically.
//! - Customers wait for the server to confirm every toggle before the page
//!   changes.
//! - Owners cannot use favorites at all.
//!
//! Everything runs on one thread. Calls to the remote service are the only
//! suspension points; an in-flight toggle for a slug rejects another toggle
//! of the same slug until it resolves.
//!
//! # Example
//!
//! ```rust,ignore
//! let favorites = Favorites::new(identity, store, remote, notifier, page);
//! favorites.on_load().await?;
//! favorites.toggle(&slug, card).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod controller;
pub mod error;
pub mod notify;
pub mod reconcile;
pub mod remote;
pub mod storage;
pub mod sync;
pub mod view;
pub mod wishlist;

#[cfg(test)]
mod test_support;

pub use config::{ClientConfig, ConfigError};
pub use controller::{Favorites, ToggleOutcome};
pub use error::FavoriteError;
pub use notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use remote::{HttpRemoteFavorites, RemoteError, RemoteFavorites};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use sync::SyncOutcome;
pub use view::{
    CardId, EmptyStateLayout, FavoriteButton, FavoriteButtonState, IconVariant, PageKind, PageView,
};
pub use wishlist::{LocalWishlist, WISHLIST_KEY, Wishlist, WishlistChange};
