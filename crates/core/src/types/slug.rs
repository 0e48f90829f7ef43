//! Favorite slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`FavoriteSlug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside the slug alphabet.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Identifier of a favoritable hotel.
///
/// Slugs are opaque to the favorites system: they are compared by exact
/// equality and never normalized. Construction only checks that the value
/// can travel safely as a single URL path segment.
///
/// ## Constraints
///
/// - Length: 1-50 characters
/// - Characters: ASCII letters, digits, `-` and `_`
///
/// ## Examples
///
/// ```
/// use hotel_favorites_core::FavoriteSlug;
///
/// assert!(FavoriteSlug::parse("grand-hotel").is_ok());
/// assert!(FavoriteSlug::parse("h42").is_ok());
///
/// assert!(FavoriteSlug::parse("").is_err());          // empty
/// assert!(FavoriteSlug::parse("a/b").is_err());       // path separator
/// assert!(FavoriteSlug::parse("grand hotel").is_err()); // whitespace
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct FavoriteSlug(String);

impl FavoriteSlug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 50;

    /// Parse a `FavoriteSlug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 50 characters,
    /// or contains characters other than ASCII alphanumerics, `-` and `_`.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SlugError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `FavoriteSlug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FavoriteSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FavoriteSlug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FavoriteSlug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FavoriteSlug> for String {
    fn from(slug: FavoriteSlug) -> Self {
        slug.0
    }
}

impl AsRef<str> for FavoriteSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
