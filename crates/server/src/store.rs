//! In-memory favorite sets, one per account.

use std::collections::{BTreeSet, HashMap};

use hotel_favorites_core::FavoriteSlug;
use tokio::sync::RwLock;

use crate::middleware::AccountId;

/// Every account's favorite set.
#[derive(Debug, Default)]
pub struct FavoriteStore {
    sets: RwLock<HashMap<AccountId, BTreeSet<FavoriteSlug>>>,
}

impl FavoriteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `slug`. Returns `true` if it is now a favorite.
    pub async fn toggle(&self, account: AccountId, slug: FavoriteSlug) -> bool {
        let mut sets = self.sets.write().await;
        let set = sets.entry(account).or_default();
        if set.remove(&slug) {
            false
        } else {
            set.insert(slug);
            true
        }
    }

    /// Union `slugs` into the account's set. Returns `true` if any was new.
    pub async fn merge(
        &self,
        account: AccountId,
        slugs: impl IntoIterator<Item = FavoriteSlug>,
    ) -> bool {
        let mut sets = self.sets.write().await;
        let set = sets.entry(account).or_default();
        slugs
            .into_iter()
            .fold(false, |added, slug| set.insert(slug) || added)
    }

    /// The account's favorites in slug order.
    pub async fn list(&self, account: AccountId) -> Vec<FavoriteSlug> {
        self.sets
            .read()
            .await
            .get(&account)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}
