//! Favorites Sync On Login.
//!
//! Merges the wishlist a visitor collected as a guest into their account and
//! clears it once the server accepted it. A failed merge leaves the wishlist
//! untouched so the next page load retries it.

use hotel_favorites_core::IdentityContext;
use tracing::{debug, info, instrument, warn};

use crate::controller::Favorites;
use crate::error::FavoriteError;
use crate::notify::{Notification, Notifier, messages};
use crate::remote::RemoteFavorites;
use crate::storage::KeyValueStore;

/// What a sync attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The visitor is not a customer; nothing was attempted.
    NotCustomer,
    /// The local wishlist was empty.
    NothingToSync,
    /// The server merged the wishlist and it was cleared locally.
    Synced {
        /// Whether the server gained any new favorite.
        added: bool,
    },
}

impl<S, R, N> Favorites<S, R, N>
where
    S: KeyValueStore,
    R: RemoteFavorites,
    N: Notifier,
{
    /// Merge the local wishlist into the customer's account.
    ///
    /// # Errors
    ///
    /// Returns [`FavoriteError::Network`] if the merge request fails. The
    /// wishlist is kept and a danger notification has been emitted.
    #[instrument(skip(self), fields(actor = %self.identity))]
    pub async fn sync_on_login(&self) -> Result<SyncOutcome, FavoriteError> {
        if self.identity != IdentityContext::Customer {
            return Ok(SyncOutcome::NotCustomer);
        }

        let wishlist = self.wishlist.load();
        if wishlist.is_empty() {
            debug!("No local favorites to sync");
            return Ok(SyncOutcome::NothingToSync);
        }

        let added = match self.remote.merge(wishlist.as_slice()).await {
            Ok(added) => added,
            Err(e) => {
                warn!(error = %e, count = wishlist.len(), "Favorites sync failed, keeping wishlist");
                self.notifier
                    .notify(Notification::danger(messages::SYNC_FAILED));
                return Err(e.into());
            }
        };

        if let Err(e) = self.wishlist.clear() {
            warn!(error = %e, "Failed to clear wishlist after sync");
        }

        info!(count = wishlist.len(), added, "Synced local favorites");
        if added {
            self.notifier
                .notify(Notification::success(messages::SYNC_ADDED));
        }
        Ok(SyncOutcome::Synced { added })
    }
}
