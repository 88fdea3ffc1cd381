//! Error types for the foodgame-agents crate.
//!
//! Every precondition failure of a player action is a typed [`ActionError`].
//! A handler that returns an error has not mutated anything.

use foodgame_types::{MarketId, PlayerId, Resource};

/// Errors that can occur while validating or executing a player action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Conversions need a strictly positive amount.
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount.
        amount: i64,
    },

    /// A listing cannot offer a negative amount of food.
    #[error("listed amount must not be negative, got {amount}")]
    NegativeListing {
        /// The rejected amount.
        amount: i64,
    },

    /// The player does not hold enough of a resource.
    #[error("insufficient {resource:?}: wanted {requested} but only have {available}")]
    InsufficientResource {
        /// The resource being spent.
        resource: Resource,
        /// The quantity the action needs.
        requested: i64,
        /// The quantity the player holds.
        available: i64,
    },

    /// Bids cannot be negative.
    #[error("bid must not be negative, got {bid}")]
    NegativeBid {
        /// The rejected bid.
        bid: i64,
    },

    /// A listing's start bid lies outside the player's allowed range.
    #[error("start bid {start_bid} outside allowed range {min}..={max}")]
    StartBidOutOfRange {
        /// The rejected start bid.
        start_bid: i64,
        /// Lower bound (`global_min_bid * min_bid_skill`).
        min: i64,
        /// Upper bound (`global_max_bid * max_bid_skill`).
        max: i64,
    },

    /// The market already holds the maximum number of listings.
    #[error("market is full ({capacity} listings)")]
    MarketFull {
        /// The listing capacity.
        capacity: usize,
    },

    /// The referenced listing does not exist (or was already sold).
    #[error("market listing not found: {0}")]
    ListingNotFound(MarketId),

    /// The referenced player does not exist.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// An arithmetic overflow occurred while applying an action.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}

impl ActionError {
    /// Shorthand for an overflow error with a static context.
    pub fn overflow(context: &str) -> Self {
        Self::ArithmeticOverflow {
            context: context.to_owned(),
        }
    }
}
