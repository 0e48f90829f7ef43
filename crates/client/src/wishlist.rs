//! Local wishlist: favorites kept on the device before sign-in.
//!
//! Persisted under [`WISHLIST_KEY`] as a JSON array of slug strings. Missing,
//! unparsable, or partially invalid data never fails a read: whatever cannot
//! be understood is dropped, and the next write stores a clean list.

use hotel_favorites_core::FavoriteSlug;
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the wishlist.
pub const WISHLIST_KEY: &str = "wishlist";

/// Result of toggling one slug in a [`Wishlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistChange {
    Added,
    Removed,
}

/// Insertion-ordered set of slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    slugs: Vec<FavoriteSlug>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { slugs: Vec::new() }
    }

    /// Build a wishlist, keeping the first occurrence of each slug.
    #[must_use]
    pub fn from_slugs(slugs: impl IntoIterator<Item = FavoriteSlug>) -> Self {
        let mut wishlist = Self::new();
        for slug in slugs {
            wishlist.insert(slug);
        }
        wishlist
    }

    /// Parse the persisted representation, dropping anything unusable.
    #[must_use]
    pub fn from_json_lossy(json: &str) -> Self {
        let raw: Vec<String> = match serde_json::from_str(json) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(error = %e, "Stored wishlist is not a list of strings, treating as empty");
                return Self::new();
            }
        };

        Self::from_slugs(raw.iter().filter_map(|s| match FavoriteSlug::parse(s) {
            Ok(slug) => Some(slug),
            Err(e) => {
                warn!(entry = %s, error = %e, "Dropping invalid wishlist entry");
                None
            }
        }))
    }

    /// Serialize to the persisted representation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.slugs)
    }

    #[must_use]
    pub fn contains(&self, slug: &FavoriteSlug) -> bool {
        self.slugs.contains(slug)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[FavoriteSlug] {
        &self.slugs
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavoriteSlug> {
        self.slugs.iter()
    }

    /// Add `slug` if absent. Returns `true` if it was added.
    pub fn insert(&mut self, slug: FavoriteSlug) -> bool {
        if self.contains(&slug) {
            return false;
        }
        self.slugs.push(slug);
        true
    }

    /// Remove `slug` if present. Returns `true` if it was removed.
    pub fn remove(&mut self, slug: &FavoriteSlug) -> bool {
        let before = self.slugs.len();
        self.slugs.retain(|s| s != slug);
        self.slugs.len() != before
    }

    /// Remove `slug` if present, add it otherwise.
    pub fn toggle(&mut self, slug: &FavoriteSlug) -> WishlistChange {
        if self.remove(slug) {
            WishlistChange::Removed
        } else {
            self.slugs.push(slug.clone());
            WishlistChange::Added
        }
    }
}

/// The wishlist as persisted in a [`KeyValueStore`].
///
/// Every call reads or writes storage directly; nothing is cached, so
/// several handles over the same store always agree.
#[derive(Debug)]
pub struct LocalWishlist<S> {
    store: S,
}

impl<S: KeyValueStore> LocalWishlist<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load the current wishlist. Unreadable storage reads as empty.
    #[must_use]
    pub fn load(&self) -> Wishlist {
        match self.store.read(WISHLIST_KEY) {
            Ok(Some(json)) => Wishlist::from_json_lossy(&json),
            Ok(None) => Wishlist::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read local wishlist, treating as empty");
                Wishlist::new()
            }
        }
    }

    /// Persist `wishlist`, replacing the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized or written.
    pub fn save(&self, wishlist: &Wishlist) -> Result<(), StorageError> {
        let json = wishlist.to_json()?;
        self.store.write(WISHLIST_KEY, &json)
    }

    /// Remove the stored wishlist entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be modified.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.clear(WISHLIST_KEY)
    }

    /// Toggle `slug` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated wishlist cannot be written. The stored
    /// value is unchanged in that case.
    pub fn toggle(&self, slug: &FavoriteSlug) -> Result<WishlistChange, StorageError> {
        let mut wishlist = self.load();
        let change = wishlist.toggle(slug);
        self.save(&wishlist)?;
        Ok(change)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn slug(s: &str) -> FavoriteSlug {
        FavoriteSlug::parse(s).unwrap()
    }

    #[test]
    fn test_toggle_round_trip() {
        let local = LocalWishlist::new(MemoryStore::new());

        assert_eq!(local.toggle(&slug("h42")).unwrap(), WishlistChange::Added);
        assert_eq!(local.load().as_slice(), &[slug("h42")]);
        assert_eq!(
            local.store().read(WISHLIST_KEY).unwrap().as_deref(),
            Some("[\"h42\"]")
        );

        assert_eq!(local.toggle(&slug("h42")).unwrap(), WishlistChange::Removed);
        assert!(local.load().is_empty());
    }

    #[test]
    fn test_toggle_preserves_order_of_others() {
        let local = LocalWishlist::new(MemoryStore::with_value(WISHLIST_KEY, r#"["a","b","c"]"#));

        local.toggle(&slug("b")).unwrap();
        assert_eq!(local.load().as_slice(), &[slug("a"), slug("c")]);

        local.toggle(&slug("b")).unwrap();
        assert_eq!(local.load().as_slice(), &[slug("a"), slug("c"), slug("b")]);
    }

    #[test]
    fn test_missing_key_is_empty() {
        let local = LocalWishlist::new(MemoryStore::new());
        assert!(local.load().is_empty());
    }

    #[test]
    fn test_corrupt_json_is_empty_and_self_heals() {
        let local = LocalWishlist::new(MemoryStore::with_value(WISHLIST_KEY, "{not json"));
        assert!(local.load().is_empty());

        local.toggle(&slug("x")).unwrap();
        assert_eq!(
            local.store().read(WISHLIST_KEY).unwrap().as_deref(),
            Some("[\"x\"]")
        );
    }

    #[test]
    fn test_wrong_shape_is_empty() {
        assert!(Wishlist::from_json_lossy(r#"{"slugs":["a"]}"#).is_empty());
        assert!(Wishlist::from_json_lossy("[1, 2]").is_empty());
        assert!(Wishlist::from_json_lossy("null").is_empty());
    }

    #[test]
    fn test_invalid_entries_and_duplicates_dropped() {
        let wishlist = Wishlist::from_json_lossy(r#"["a", "", "b", "a", "bad slug"]"#);
        assert_eq!(wishlist.as_slice(), &[slug("a"), slug("b")]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.insert(slug("a")));
        assert!(!wishlist.insert(slug("a")));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_clear_removes_key() {
        let local = LocalWishlist::new(MemoryStore::with_value(WISHLIST_KEY, r#"["a"]"#));
        local.clear().unwrap();
        assert_eq!(local.store().read(WISHLIST_KEY).unwrap(), None);
    }
}
