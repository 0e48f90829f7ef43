//! Local wishlist commands.
//!
//! None of these talk to the favorites server.

use hotel_favorites_client::{
    ClientConfig, FileStore, HttpRemoteFavorites, LocalWishlist, PageKind, PageView,
};
use hotel_favorites_core::IdentityContext;

use super::{CommandError, host, log_card, parse_slugs};

fn local(config: &ClientConfig) -> LocalWishlist<FileStore> {
    LocalWishlist::new(FileStore::new(config.storage_dir.clone()))
}

/// Print the local wishlist.
pub fn list(config: &ClientConfig) {
    let wishlist = local(config).load();
    if wishlist.is_empty() {
        tracing::info!("Wishlist is empty");
        return;
    }

    tracing::info!(count = wishlist.len(), "Wishlist:");
    for slug in wishlist.iter() {
        tracing::info!("  {}", slug);
    }
}

/// Clear the local wishlist.
///
/// # Errors
///
/// Returns an error if the stored wishlist cannot be removed.
pub fn clear(config: &ClientConfig) -> Result<(), CommandError> {
    local(config).clear()?;
    tracing::info!("Wishlist cleared");
    Ok(())
}

/// Render a guest page with one control per slug and restore their markers.
///
/// Returns the number of controls marked favorited.
///
/// # Errors
///
/// Returns an error if a slug is invalid.
pub fn restore(config: &ClientConfig, slugs: &[String]) -> Result<usize, CommandError> {
    let mut page = PageView::new(PageKind::Browse);
    for slug in parse_slugs(slugs)? {
        page.add_card(slug, false);
    }

    let favorites = host(
        config,
        IdentityContext::Guest,
        HttpRemoteFavorites::new(config)?,
        page,
    );
    let marked = favorites.restore_local_favorites();

    for card in favorites.page().cards() {
        log_card(card);
    }
    tracing::info!(marked, "Restored favorites from wishlist");
    Ok(marked)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hotel_favorites_client::{KeyValueStore, WISHLIST_KEY};

    use super::*;

    fn config(dir: &std::path::Path) -> ClientConfig {
        ClientConfig::from_lookup(|key| match key {
            "FAVORITES_BASE_URL" => Some("http://127.0.0.1:9".to_string()),
            "FAVORITES_STORAGE_DIR" => Some(dir.display().to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_restore_marks_only_wishlisted_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        FileStore::new(dir.path())
            .write(WISHLIST_KEY, r#"["harbour-inn"]"#)
            .unwrap();

        let marked = restore(
            &config,
            &["grand-plaza".to_string(), "harbour-inn".to_string()],
        )
        .unwrap();

        assert_eq!(marked, 1);
    }

    #[test]
    fn test_restore_rejects_invalid_slug() {
        let dir = tempfile::tempdir().unwrap();
        let result = restore(&config(dir.path()), &["no spaces".to_string()]);
        assert!(matches!(result, Err(CommandError::Slug(_))));
    }

    #[test]
    fn test_clear_removes_wishlist() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let store = FileStore::new(dir.path());
        store.write(WISHLIST_KEY, r#"["a"]"#).unwrap();

        clear(&config).unwrap();

        assert_eq!(store.read(WISHLIST_KEY).unwrap(), None);
        assert!(local(&config).load().is_empty());
    }
}
