//! CLI command implementations.

pub mod favorites;
pub mod wishlist;

use hotel_favorites_client::view::Card;
use hotel_favorites_client::{
    ClientConfig, FavoriteError, Favorites, FileStore, HttpRemoteFavorites, PageView,
    RemoteError, StorageError, TracingNotifier,
};
use hotel_favorites_core::{FavoriteSlug, IdentityContext, SlugError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A slug argument is malformed.
    #[error("Invalid slug: {0}")]
    Slug(#[from] SlugError),

    /// The favorites server could not be reached.
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// The local wishlist could not be changed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A favorite operation failed.
    #[error(transparent)]
    Favorite(#[from] FavoriteError),

    /// The hotel has no card on the requested listing page.
    #[error("{slug} is not listed on {page}")]
    NotOnPage { slug: FavoriteSlug, page: String },
}

/// Favorites wired to the device store, the favorites server and the log.
pub type Host = Favorites<FileStore, HttpRemoteFavorites, TracingNotifier>;

/// Build the favorites host for `page`.
pub fn host(
    config: &ClientConfig,
    identity: IdentityContext,
    remote: HttpRemoteFavorites,
    page: PageView,
) -> Host {
    Favorites::new(
        identity,
        FileStore::new(config.storage_dir.clone()),
        remote,
        TracingNotifier,
        page,
    )
}

fn parse_slugs(raw: &[String]) -> Result<Vec<FavoriteSlug>, SlugError> {
    raw.iter().map(|s| FavoriteSlug::parse(s)).collect()
}

fn log_card(card: &Card) {
    let state = card.button.state();
    tracing::info!(
        card = %card.id,
        slug = %state.slug,
        favorited = state.is_favorited,
        icon = state.icon_variant.class(),
        "{}",
        state.tooltip_text
    );
}

fn log_empty_state(page: &PageView) {
    if let Some(layout) = page.empty_state() {
        if layout.placeholder_visible() {
            tracing::info!("No favorites to show");
        } else {
            tracing::info!(results = page.result_count(), "Showing favorites");
        }
    }
}
