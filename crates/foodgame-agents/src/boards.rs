//! Shared game boards written by player actions and read by the resolvers.

use crate::auction::SkillBids;
use crate::market::{FoodBids, FoodMarket};
use crate::votes::{FoodVoteTally, SkillVoteTally};

/// Every board that player actions write to.
#[derive(Debug, Clone, Default)]
pub struct Boards {
    /// Open food listings.
    pub market: FoodMarket,
    /// Pending food bids.
    pub food_bids: FoodBids,
    /// Pending skill-auction bids.
    pub skill_bids: SkillBids,
    /// Votes for the next auctioned skill.
    pub skill_votes: SkillVoteTally,
    /// Votes to move the global bid bounds.
    pub food_votes: FoodVoteTally,
}

impl Boards {
    /// Empty boards.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero both vote tallies.
    pub fn reset_votes(&mut self) {
        self.skill_votes.reset();
        self.food_votes.reset();
    }

    /// Drop every listing, bid, and vote.
    pub fn clear(&mut self) {
        self.market.clear();
        self.food_bids.clear();
        self.skill_bids.clear();
        self.reset_votes();
    }
}
