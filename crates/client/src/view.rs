//! Rendered page model.
//!
//! A [`PageView`] is what the favorites logic can see of the page: the hotel
//! cards with their favorite controls, and optionally a results container
//! paired with an empty-state placeholder.

use hotel_favorites_core::FavoriteSlug;

/// Tooltip of an unfavorited control.
pub const SAVE_TOOLTIP: &str = "Save to favorites";

/// Tooltip of a favorited control.
pub const REMOVE_TOOLTIP: &str = "Remove from favorites";

/// Path fragments that identify a favorites-listing page.
const LISTING_PATHS: &[&str] = &["/customer_favorites", "/guest_favorites"];

/// Icon drawn inside a favorite control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconVariant {
    /// Outlined heart (`far`).
    Outline,
    /// Filled heart (`fas`).
    Solid,
}

impl IconVariant {
    /// Icon font class of this variant.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Outline => "far",
            Self::Solid => "fas",
        }
    }
}

/// Projection of a control for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteButtonState {
    pub slug: FavoriteSlug,
    pub is_favorited: bool,
    pub tooltip_text: &'static str,
    pub icon_variant: IconVariant,
}

/// A favorite control bound to one slug.
///
/// Tooltip and icon are derived from `favorited`, so they can never disagree
/// with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteButton {
    slug: FavoriteSlug,
    favorited: bool,
}

impl FavoriteButton {
    #[must_use]
    pub const fn new(slug: FavoriteSlug, favorited: bool) -> Self {
        Self { slug, favorited }
    }

    #[must_use]
    pub const fn slug(&self) -> &FavoriteSlug {
        &self.slug
    }

    #[must_use]
    pub const fn is_favorited(&self) -> bool {
        self.favorited
    }

    pub const fn set_favorited(&mut self, favorited: bool) {
        self.favorited = favorited;
    }

    #[must_use]
    pub const fn tooltip(&self) -> &'static str {
        if self.favorited {
            REMOVE_TOOLTIP
        } else {
            SAVE_TOOLTIP
        }
    }

    #[must_use]
    pub const fn icon(&self) -> IconVariant {
        if self.favorited {
            IconVariant::Solid
        } else {
            IconVariant::Outline
        }
    }

    #[must_use]
    pub fn state(&self) -> FavoriteButtonState {
        FavoriteButtonState {
            slug: self.slug.clone(),
            is_favorited: self.favorited,
            tooltip_text: self.tooltip(),
            icon_variant: self.icon(),
        }
    }
}

/// Handle to a card on a page. Stable for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(pub(crate) usize);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A hotel card carrying one favorite control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub button: FavoriteButton,
}

/// Kind of page being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Any page listing hotels.
    Browse,
    /// The page listing the visitor's favorites. Unfavorited cards are removed.
    FavoritesListing,
}

impl PageKind {
    /// Classify a page from its URL path.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if LISTING_PATHS.iter().any(|p| path.contains(p)) {
            Self::FavoritesListing
        } else {
            Self::Browse
        }
    }
}

/// Visibility of the results container and its empty-state placeholder.
///
/// Exactly one of the two is visible; the constructors cannot express any
/// other combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyStateLayout {
    placeholder_visible: bool,
}

impl EmptyStateLayout {
    /// Container visible, placeholder hidden.
    #[must_use]
    pub const fn showing_results() -> Self {
        Self {
            placeholder_visible: false,
        }
    }

    /// Placeholder visible, container hidden.
    #[must_use]
    pub const fn showing_placeholder() -> Self {
        Self {
            placeholder_visible: true,
        }
    }

    #[must_use]
    pub const fn container_visible(self) -> bool {
        !self.placeholder_visible
    }

    #[must_use]
    pub const fn placeholder_visible(self) -> bool {
        self.placeholder_visible
    }
}

/// The page as seen by the favorites logic.
#[derive(Debug, Clone)]
pub struct PageView {
    kind: PageKind,
    cards: Vec<Card>,
    next_id: usize,
    empty_state: Option<EmptyStateLayout>,
}

impl PageView {
    /// Create a page without a results container or placeholder.
    #[must_use]
    pub const fn new(kind: PageKind) -> Self {
        Self {
            kind,
            cards: Vec::new(),
            next_id: 0,
            empty_state: None,
        }
    }

    /// Give the page a results container and an empty-state placeholder.
    ///
    /// The cards of the page are the container's result items. Initially the
    /// container is shown; call `update_empty_state` to settle it.
    #[must_use]
    pub const fn with_empty_state(mut self) -> Self {
        self.empty_state = Some(EmptyStateLayout::showing_results());
        self
    }

    /// Render a card for `slug`.
    pub fn add_card(&mut self, slug: FavoriteSlug, favorited: bool) -> CardId {
        let id = CardId(self.next_id);
        self.next_id += 1;
        self.cards.push(Card {
            id,
            button: FavoriteButton::new(slug, favorited),
        });
        id
    }

    #[must_use]
    pub const fn kind(&self) -> PageKind {
        self.kind
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Number of result items in the container.
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.cards.len()
    }

    /// Current empty-state layout, if the page has a container and placeholder.
    #[must_use]
    pub const fn empty_state(&self) -> Option<EmptyStateLayout> {
        self.empty_state
    }

    pub(crate) fn set_empty_state(&mut self, layout: EmptyStateLayout) {
        if self.empty_state.is_some() {
            self.empty_state = Some(layout);
        }
    }

    pub(crate) fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.iter_mut()
    }

    /// Set the favorited state of every control bound to `slug`.
    pub(crate) fn mark(&mut self, slug: &FavoriteSlug, favorited: bool) {
        self.cards
            .iter_mut()
            .filter(|c| c.button.slug() == slug)
            .for_each(|c| c.button.set_favorited(favorited));
    }

    /// Remove every card bound to `slug`. Returns how many were removed.
    pub(crate) fn remove_cards(&mut self, slug: &FavoriteSlug) -> usize {
        let before = self.cards.len();
        self.cards.retain(|c| c.button.slug() != slug);
        before - self.cards.len()
    }
}
