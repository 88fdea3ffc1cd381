//! Action types exchanged between players and the engine.
//!
//! A player submits either a scalar [`ActionId`], a [`RawAction`] (kind plus
//! one-based codec parameters), or an already resolved [`Action`]. The codec
//! in `foodgame-core` turns the first two into the third.

use serde::{Deserialize, Serialize};

use crate::enums::{ActionKind, FoodVote, Skill};
use crate::ids::{MarketId, PlayerId};

/// A scalar action identifier as produced by an external policy.
///
/// Valid ids lie in `0..=boundary`; anything outside is clamped by the codec.
pub type ActionId = i64;

/// An action kind with its one-based codec parameters.
///
/// Parameter values range from 1 to the cardinality the registry declares
/// for that slot (e.g. 1..=100 for a percentage).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawAction {
    /// The action kind.
    pub kind: ActionKind,
    /// One-based parameter values, one per registry slot.
    pub params: Vec<u32>,
}

impl RawAction {
    /// Create a raw action.
    pub const fn new(kind: ActionKind, params: Vec<u32>) -> Self {
        Self { kind, params }
    }

    /// The canonical no-op.
    pub fn do_nothing() -> Self {
        Self::new(ActionKind::DoNothing, vec![1])
    }
}

/// A fully resolved action, ready for validation and execution.
///
/// Amounts and bids are absolute quantities. References to players and
/// listings are ids, which may have gone stale by the time the action runs;
/// handlers re-check them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// No-op.
    DoNothing,
    /// Spend `amount` energy to produce food.
    EnergyToFood {
        /// Energy to spend.
        amount: i64,
    },
    /// Vote for the skill auctioned after the current one.
    AddVoteForSkillAuction {
        /// The skill voted for.
        skill: Skill,
    },
    /// Bid coins in the current skill auction.
    AddBidForSkillAuction {
        /// Coins offered.
        bid: i64,
    },
    /// Spend `amount` energy to produce coins.
    EnergyToCoins {
        /// Energy to spend.
        amount: i64,
    },
    /// Raise `target`'s turn priority for the next turn.
    AddVoteForTurn {
        /// The player voted for.
        target: PlayerId,
    },
    /// Vote to move a global start-bid bound.
    AddFoodVote {
        /// The category voted for.
        vote: FoodVote,
    },
    /// List food on the market.
    AddToMarket {
        /// Food offered.
        amount: i64,
        /// Minimum price; bids must exceed it.
        start_bid: i64,
    },
    /// Bid on a market listing.
    AddBidForFood {
        /// The listing bid on.
        market: MarketId,
        /// Coins offered.
        bid: i64,
        /// Bucket in which the bid is resolved; lower buckets resolve first.
        priority: i64,
    },
}

impl Action {
    /// The kind of this action.
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::DoNothing => ActionKind::DoNothing,
            Self::EnergyToFood { .. } => ActionKind::EnergyToFood,
            Self::AddVoteForSkillAuction { .. } => ActionKind::AddVoteForSkillAuction,
            Self::AddBidForSkillAuction { .. } => ActionKind::AddBidForSkillAuction,
            Self::EnergyToCoins { .. } => ActionKind::EnergyToCoins,
            Self::AddVoteForTurn { .. } => ActionKind::AddVoteForTurn,
            Self::AddFoodVote { .. } => ActionKind::AddFoodVote,
            Self::AddToMarket { .. } => ActionKind::AddToMarket,
            Self::AddBidForFood { .. } => ActionKind::AddBidForFood,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_matches_variant() {
        let action = Action::AddToMarket {
            amount: 3,
            start_bid: 1,
        };
        assert_eq!(action.kind(), ActionKind::AddToMarket);
        assert_eq!(Action::DoNothing.kind(), ActionKind::DoNothing);
    }

    #[test]
    fn raw_do_nothing_has_one_param() {
        let raw = RawAction::do_nothing();
        assert_eq!(raw.kind, ActionKind::DoNothing);
        assert_eq!(raw.params, vec![1]);
    }
}
