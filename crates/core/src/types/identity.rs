//! Actor identity.

use serde::{Deserialize, Serialize};

/// Who is currently using the page.
///
/// Exactly one variant holds at a time. The controller decides which store
/// is authoritative from this value alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdentityContext {
    /// Not authenticated. Favorites live in the local wishlist.
    #[default]
    Guest,
    /// Authenticated customer account. Favorites live on the server.
    Customer,
    /// Hotel owner account. Favorites are not available.
    Owner,
}

impl IdentityContext {
    /// Classify an actor from session flags.
    ///
    /// Owner takes precedence over every other flag; a customer must also be
    /// logged in to count as one.
    #[must_use]
    pub const fn from_flags(is_logged_in: bool, is_customer: bool, is_owner: bool) -> Self {
        if is_owner {
            Self::Owner
        } else if is_logged_in && is_customer {
            Self::Customer
        } else {
            Self::Guest
        }
    }

    #[must_use]
    pub const fn is_guest(self) -> bool {
        matches!(self, Self::Guest)
    }

    #[must_use]
    pub const fn is_customer(self) -> bool {
        matches!(self, Self::Customer)
    }
}

impl std::fmt::Display for IdentityContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::Customer => write!(f, "customer"),
            Self::Owner => write!(f, "owner"),
        }
    }
}

impl std::str::FromStr for IdentityContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Self::Guest),
            "customer" => Ok(Self::Customer),
            "owner" => Ok(Self::Owner),
            _ => Err(format!("invalid actor: {s}")),
        }
    }
}
