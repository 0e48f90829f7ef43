//! Favorite Toggle Controller.
//!
//! Decides, per actor, which store a toggle mutates:
//!
//! | Actor    | Store            | Page update                         |
//! |----------|------------------|-------------------------------------|
//! | Owner    | none             | none, warning notification          |
//! | Customer | remote (awaited) | only after the server confirms      |
//! | Guest    | local wishlist   | immediately, no server involvement  |

use std::cell::{Ref, RefCell};
use std::collections::HashSet;

use hotel_favorites_core::{FavoriteSlug, IdentityContext};
use tracing::{debug, error, info, instrument, warn};

use crate::error::FavoriteError;
use crate::notify::{Notification, Notifier, messages};
use crate::remote::RemoteFavorites;
use crate::storage::KeyValueStore;
use crate::view::{CardId, PageKind, PageView};
use crate::wishlist::{LocalWishlist, WishlistChange};

/// Result of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl From<WishlistChange> for ToggleOutcome {
    fn from(change: WishlistChange) -> Self {
        match change {
            WishlistChange::Added => Self::Added,
            WishlistChange::Removed => Self::Removed,
        }
    }
}

/// Favorites state for one page load.
///
/// Owns the page model and the collaborators. All methods take `&self` so
/// several toggles can be outstanding on the same event loop at once; no
/// borrow of the page is held across a network call.
pub struct Favorites<S, R, N> {
    pub(crate) identity: IdentityContext,
    pub(crate) wishlist: LocalWishlist<S>,
    pub(crate) remote: R,
    pub(crate) notifier: N,
    pub(crate) page: RefCell<PageView>,
    in_flight: RefCell<HashSet<FavoriteSlug>>,
}

impl<S, R, N> Favorites<S, R, N>
where
    S: KeyValueStore,
    R: RemoteFavorites,
    N: Notifier,
{
    /// Create the favorites state for a page.
    #[must_use]
    pub fn new(
        identity: IdentityContext,
        store: S,
        remote: R,
        notifier: N,
        page: PageView,
    ) -> Self {
        Self {
            identity,
            wishlist: LocalWishlist::new(store),
            remote,
            notifier,
            page: RefCell::new(page),
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    #[must_use]
    pub const fn identity(&self) -> IdentityContext {
        self.identity
    }

    /// Borrow the current page model.
    ///
    /// # Panics
    ///
    /// Panics if called while the page is being updated, which cannot happen
    /// from outside this type.
    pub fn page(&self) -> Ref<'_, PageView> {
        self.page.borrow()
    }

    #[must_use]
    pub const fn wishlist(&self) -> &LocalWishlist<S> {
        &self.wishlist
    }

    #[must_use]
    pub const fn remote(&self) -> &R {
        &self.remote
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Toggle `slug` from the control on `card`.
    ///
    /// # Errors
    ///
    /// - [`FavoriteError::PermissionDenied`] for owners (after a warning notification)
    /// - [`FavoriteError::ControlNotFound`] / [`FavoriteError::ControlMismatch`]
    ///   if `card` does not carry a control bound to `slug`
    /// - [`FavoriteError::InFlight`] if a customer toggle of `slug` is pending
    /// - [`FavoriteError::Network`] if the server call fails (after a danger notification)
    /// - [`FavoriteError::Storage`] if the wishlist cannot be saved (after a danger notification)
    #[instrument(skip(self, slug), fields(slug = %slug, actor = %self.identity))]
    pub async fn toggle(
        &self,
        slug: &FavoriteSlug,
        card: CardId,
    ) -> Result<ToggleOutcome, FavoriteError> {
        match self.identity {
            IdentityContext::Owner => {
                info!("Favorite toggle denied for owner");
                self.notifier
                    .notify(Notification::warning(messages::OWNER_DENIED));
                Err(FavoriteError::PermissionDenied)
            }
            IdentityContext::Customer => {
                self.check_control(slug, card)?;
                self.toggle_remote(slug).await
            }
            IdentityContext::Guest => {
                self.check_control(slug, card)?;
                self.toggle_local(slug)
            }
        }
    }

    fn check_control(&self, slug: &FavoriteSlug, card: CardId) -> Result<(), FavoriteError> {
        let page = self.page.borrow();
        let bound = page
            .card(card)
            .ok_or(FavoriteError::ControlNotFound(card))?
            .button
            .slug();

        if bound != slug {
            return Err(FavoriteError::ControlMismatch {
                card,
                bound: bound.clone(),
                requested: slug.clone(),
            });
        }
        Ok(())
    }

    async fn toggle_remote(&self, slug: &FavoriteSlug) -> Result<ToggleOutcome, FavoriteError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, slug) else {
            debug!("Toggle already in flight, ignoring");
            return Err(FavoriteError::InFlight(slug.clone()));
        };

        match self.remote.toggle(slug).await {
            Ok(true) => {
                self.page.borrow_mut().mark(slug, true);
                self.notifier
                    .notify(Notification::success(messages::REMOTE_SAVED));
                Ok(ToggleOutcome::Added)
            }
            Ok(false) => {
                self.page.borrow_mut().mark(slug, false);
                self.notifier
                    .notify(Notification::info(messages::REMOTE_REMOVED));
                if self.remove_from_listing(slug) {
                    self.update_empty_state();
                }
                Ok(ToggleOutcome::Removed)
            }
            Err(e) => {
                warn!(error = %e, "Remote favorite toggle failed");
                self.notifier
                    .notify(Notification::danger(messages::REMOTE_FAILED));
                Err(e.into())
            }
        }
    }

    fn toggle_local(&self, slug: &FavoriteSlug) -> Result<ToggleOutcome, FavoriteError> {
        let change = match self.wishlist.toggle(slug) {
            Ok(change) => change,
            Err(e) => {
                error!(error = %e, "Failed to persist local wishlist");
                self.notifier
                    .notify(Notification::danger(messages::LOCAL_SAVE_FAILED));
                return Err(e.into());
            }
        };

        match change {
            WishlistChange::Removed => {
                self.page.borrow_mut().mark(slug, false);
                self.notifier
                    .notify(Notification::info(messages::LOCAL_REMOVED));
                self.remove_from_listing(slug);
            }
            WishlistChange::Added => {
                self.page.borrow_mut().mark(slug, true);
                self.notifier
                    .notify(Notification::success(messages::LOCAL_SAVED));
            }
        }

        self.update_empty_state();
        Ok(change.into())
    }

    /// On a favorites-listing page, drop the cards of an unfavorited slug.
    fn remove_from_listing(&self, slug: &FavoriteSlug) -> bool {
        let mut page = self.page.borrow_mut();
        if page.kind() != PageKind::FavoritesListing {
            return false;
        }
        let removed = page.remove_cards(slug);
        debug!(removed, "Removed unfavorited cards from listing");
        true
    }
}

/// Marks a slug as having a request in flight until dropped.
struct InFlightGuard<'a> {
    set: &'a RefCell<HashSet<FavoriteSlug>>,
    slug: FavoriteSlug,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(set: &'a RefCell<HashSet<FavoriteSlug>>, slug: &FavoriteSlug) -> Option<Self> {
        set.borrow_mut().insert(slug.clone()).then(|| Self {
            set,
            slug: slug.clone(),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.borrow_mut().remove(&self.slug);
    }
}
