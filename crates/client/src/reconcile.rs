//! View Reconciler.
//!
//! Brings the page model in line with the authoritative favorites store for
//! the current actor: controls are marked from the local wishlist on load,
//! and the empty-state layout is recomputed after every mutation.

use hotel_favorites_core::IdentityContext;
use tracing::{debug, instrument};

use crate::controller::Favorites;
use crate::error::FavoriteError;
use crate::notify::Notifier;
use crate::remote::RemoteFavorites;
use crate::storage::KeyValueStore;
use crate::sync::SyncOutcome;
use crate::view::EmptyStateLayout;

impl<S, R, N> Favorites<S, R, N>
where
    S: KeyValueStore,
    R: RemoteFavorites,
    N: Notifier,
{
    /// Mark every control whose slug is in the local wishlist as favorited.
    ///
    /// Only guests have a local wishlist worth showing; for other actors the
    /// server-rendered state stands. Returns the number of controls marked.
    #[instrument(skip(self), fields(actor = %self.identity))]
    pub fn restore_local_favorites(&self) -> usize {
        if self.identity != IdentityContext::Guest {
            return 0;
        }

        let wishlist = self.wishlist.load();
        if wishlist.is_empty() {
            return 0;
        }

        let mut page = self.page.borrow_mut();
        let mut marked = 0;
        for card in page.cards_mut() {
            if wishlist.contains(card.button.slug()) {
                card.button.set_favorited(true);
                marked += 1;
            }
        }
        debug!(marked, "Restored local favorites");
        marked
    }

    /// Recompute which of the results container and placeholder is visible.
    ///
    /// Anyone who is not a customer sees the placeholder when the local
    /// wishlist is empty or nothing is rendered. Customers see it only when
    /// nothing is rendered. Pages without a container are left alone.
    pub fn update_empty_state(&self) {
        let wishlist_empty = match self.identity {
            IdentityContext::Guest | IdentityContext::Owner => self.wishlist.load().is_empty(),
            IdentityContext::Customer => false,
        };

        let mut page = self.page.borrow_mut();
        let layout = if wishlist_empty || page.result_count() == 0 {
            EmptyStateLayout::showing_placeholder()
        } else {
            EmptyStateLayout::showing_results()
        };
        page.set_empty_state(layout);
    }

    /// Run the page-load sequence: restore markers, sync, settle the layout.
    ///
    /// The layout is settled even when the sync fails.
    ///
    /// # Errors
    ///
    /// Returns the sync error, see [`Favorites::sync_on_login`].
    pub async fn on_load(&self) -> Result<SyncOutcome, FavoriteError> {
        self.restore_local_favorites();
        let outcome = self.sync_on_login().await;
        self.update_empty_state();
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::remote::RemoteError;
    use crate::storage::MemoryStore;
    use crate::test_support::{ScriptedRemote, slug};
    use crate::view::{PageKind, PageView};
    use crate::wishlist::WISHLIST_KEY;

    type TestFavorites = Favorites<MemoryStore, ScriptedRemote, Rc<RecordingNotifier>>;

    fn favorites(
        identity: IdentityContext,
        stored: &str,
        page: PageView,
        remote: ScriptedRemote,
    ) -> TestFavorites {
        Favorites::new(
            identity,
            MemoryStore::with_value(WISHLIST_KEY, stored),
            remote,
            Rc::new(RecordingNotifier::new()),
            page,
        )
    }

    fn listing(slugs: &[&str]) -> PageView {
        let mut page = PageView::new(PageKind::FavoritesListing).with_empty_state();
        for s in slugs {
            page.add_card(slug(s), false);
        }
        page
    }

    fn placeholder_visible(f: &TestFavorites) -> bool {
        let layout = f.page().empty_state().unwrap();
        assert_ne!(layout.container_visible(), layout.placeholder_visible());
        layout.placeholder_visible()
    }

    #[test]
    fn test_restore_marks_wishlisted_controls_without_network() {
        let mut page = PageView::new(PageKind::Browse);
        let x = page.add_card(slug("x"), false);
        let y = page.add_card(slug("y"), false);
        let f = favorites(IdentityContext::Guest, r#"["x"]"#, page, ScriptedRemote::new());

        assert_eq!(f.restore_local_favorites(), 1);

        let page = f.page();
        assert!(page.card(x).unwrap().button.is_favorited());
        assert!(!page.card(y).unwrap().button.is_favorited());
        assert!(f.remote().calls().is_empty());
    }

    #[test]
    fn test_restore_is_guest_only() {
        for identity in [IdentityContext::Customer, IdentityContext::Owner] {
            let mut page = PageView::new(PageKind::Browse);
            let x = page.add_card(slug("x"), false);
            let f = favorites(identity, r#"["x"]"#, page, ScriptedRemote::new());

            assert_eq!(f.restore_local_favorites(), 0);
            assert!(!f.page().card(x).unwrap().button.is_favorited());
        }
    }

    #[test]
    fn test_guest_placeholder_follows_wishlist_and_results() {
        let f = favorites(IdentityContext::Guest, r#"["a"]"#, listing(&["a"]), ScriptedRemote::new());
        f.update_empty_state();
        assert!(!placeholder_visible(&f));

        // Stale rendered items do not count once the wishlist is empty
        let f = favorites(IdentityContext::Guest, "[]", listing(&["a"]), ScriptedRemote::new());
        f.update_empty_state();
        assert!(placeholder_visible(&f));

        let f = favorites(IdentityContext::Guest, r#"["a"]"#, listing(&[]), ScriptedRemote::new());
        f.update_empty_state();
        assert!(placeholder_visible(&f));
    }

    #[test]
    fn test_customer_placeholder_ignores_local_wishlist() {
        let f = favorites(IdentityContext::Customer, "[]", listing(&["a"]), ScriptedRemote::new());
        f.update_empty_state();
        assert!(!placeholder_visible(&f));

        let f = favorites(IdentityContext::Customer, r#"["a"]"#, listing(&[]), ScriptedRemote::new());
        f.update_empty_state();
        assert!(placeholder_visible(&f));
    }

    #[test]
    fn test_owner_placeholder_follows_local_wishlist() {
        let f = favorites(IdentityContext::Owner, "[]", listing(&["a"]), ScriptedRemote::new());
        f.update_empty_state();
        assert!(placeholder_visible(&f));

        let f = favorites(IdentityContext::Owner, r#"["a"]"#, listing(&["a"]), ScriptedRemote::new());
        f.update_empty_state();
        assert!(!placeholder_visible(&f));
    }

    #[test]
    fn test_update_without_container_leaves_page_alone() {
        let f = favorites(
            IdentityContext::Guest,
            "[]",
            PageView::new(PageKind::Browse),
            ScriptedRemote::new(),
        );
        f.update_empty_state();
        assert_eq!(f.page().empty_state(), None);
    }

    #[tokio::test]
    async fn test_on_load_settles_layout_even_when_sync_fails() {
        let f = favorites(
            IdentityContext::Customer,
            r#"["a"]"#,
            listing(&[]),
            ScriptedRemote::new().with_merge(Err(RemoteError::Status(503))),
        );

        assert!(f.on_load().await.is_err());
        assert!(placeholder_visible(&f));
    }

    #[tokio::test]
    async fn test_on_load_for_guest_restores_without_sync() {
        let mut page = PageView::new(PageKind::FavoritesListing).with_empty_state();
        let a = page.add_card(slug("a"), false);
        let f = favorites(IdentityContext::Guest, r#"["a"]"#, page, ScriptedRemote::new());

        assert_eq!(f.on_load().await.unwrap(), SyncOutcome::NotCustomer);
        assert!(f.page().card(a).unwrap().button.is_favorited());
        assert!(!placeholder_visible(&f));
        assert!(f.remote().calls().is_empty());
    }
}
