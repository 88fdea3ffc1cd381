//! Type-safe identifier wrappers.
//!
//! Market listings and ledger entries carry [`Uuid`] v7 identifiers
//! (time-ordered). Players are identified by a [`PlayerId`] string, which
//! is either a caller-chosen username or a random UUID v4 rendered as text.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a food market listing.
    MarketId
}

define_id! {
    /// Unique identifier for a ledger entry (resource transfer record).
    LedgerEntryId
}

/// Identifier of a player within a game.
///
/// Unique per game. Generated players get a UUID v4 string; named players
/// keep their username (suffixed with `-N` by the roster on collision).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a player id from a random UUID v4.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a player id from an arbitrary name.
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_ids_are_unique() {
        let a = MarketId::new();
        let b = MarketId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn generated_player_ids_parse_as_uuid() {
        let id = PlayerId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn player_id_serializes_as_plain_string() {
        let id = PlayerId::named("alice");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"alice\""));
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = MarketId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
