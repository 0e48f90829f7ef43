//! Commands that run the page load sequence and toggle favorites.

use hotel_favorites_client::{
    CardId, ClientConfig, FileStore, HttpRemoteFavorites, LocalWishlist, PageKind, PageView,
    SyncOutcome,
};
use hotel_favorites_core::{FavoriteSlug, IdentityContext};

use super::{CommandError, host, log_card, log_empty_state};

/// Toggle `slug` from a control on the page at `path`.
///
/// On a favorites-listing page the cards are the actor's favorites, so the
/// slug must already be one of them. Owners get the target card whatever
/// the page, so the refusal comes from the toggle itself.
///
/// # Errors
///
/// Returns an error if the slug is invalid or not on the page, the server's
/// favorites cannot be fetched, or the toggle fails.
pub async fn toggle(
    config: &ClientConfig,
    identity: IdentityContext,
    slug: &str,
    path: &str,
) -> Result<(), CommandError> {
    let slug = FavoriteSlug::parse(slug)?;
    let remote = HttpRemoteFavorites::new(config)?;

    // Sync first: the server list must include what the wishlist merges in
    let server_favorites = if identity.is_customer() {
        let loader = host(config, identity, remote.clone(), PageView::new(PageKind::Browse));
        if let Err(e) = loader.sync_on_login().await {
            tracing::warn!(error = %e, "Page loaded without syncing favorites");
        }
        remote.list().await?
    } else {
        Vec::new()
    };

    let (page, card) = match PageKind::from_path(path) {
        PageKind::Browse => browse_page(&slug, server_favorites.contains(&slug)),
        PageKind::FavoritesListing => {
            let listed = match identity {
                IdentityContext::Guest => {
                    LocalWishlist::new(FileStore::new(config.storage_dir.clone()))
                        .load()
                        .iter()
                        .cloned()
                        .collect()
                }
                IdentityContext::Customer => server_favorites,
                IdentityContext::Owner => vec![slug.clone()],
            };
            listing_page(listed, &slug).ok_or_else(|| CommandError::NotOnPage {
                slug: slug.clone(),
                page: path.to_string(),
            })?
        }
    };

    let favorites = host(config, identity, remote, page);
    favorites.restore_local_favorites();
    favorites.update_empty_state();

    let outcome = favorites.toggle(&slug, card).await?;
    tracing::info!(?outcome, %slug, "Toggled favorite");

    let page = favorites.page();
    match page.card(card) {
        Some(card) => log_card(card),
        None => tracing::info!(%slug, "Removed from this page"),
    }
    log_empty_state(&page);
    Ok(())
}

/// Run the page load sequence, syncing the local wishlist for customers.
///
/// # Errors
///
/// Returns an error if the sync request fails. The wishlist is kept.
pub async fn sync(config: &ClientConfig, identity: IdentityContext) -> Result<(), CommandError> {
    let favorites = host(
        config,
        identity,
        HttpRemoteFavorites::new(config)?,
        PageView::new(PageKind::Browse),
    );

    match favorites.on_load().await? {
        SyncOutcome::NotCustomer => {
            tracing::info!(actor = %identity, "Only customers sync favorites");
        }
        SyncOutcome::NothingToSync => tracing::info!("No local favorites to sync"),
        SyncOutcome::Synced { added } => tracing::info!(added, "Local favorites synced"),
    }
    Ok(())
}

fn browse_page(slug: &FavoriteSlug, favorited: bool) -> (PageView, CardId) {
    let mut page = PageView::new(PageKind::Browse);
    let card = page.add_card(slug.clone(), favorited);
    (page, card)
}

/// Render a listing of `listed` and find the card for `slug`.
fn listing_page(listed: Vec<FavoriteSlug>, slug: &FavoriteSlug) -> Option<(PageView, CardId)> {
    let mut page = PageView::new(PageKind::FavoritesListing).with_empty_state();
    let mut target = None;
    for listed_slug in listed {
        let is_target = &listed_slug == slug;
        let card = page.add_card(listed_slug, true);
        if is_target {
            target = Some(card);
        }
    }
    target.map(|card| (page, card))
}
