//! Enumeration types for the food game.
//!
//! The order of variants in [`Skill`], [`FoodVote`], and [`ActionKind`] is
//! part of the external contract: observation vectors, vote tallies, and the
//! action codec all index by position.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A resource held by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Consumed every turn by the food requirement. Negative food means death.
    Food,
    /// Converted into coins or food.
    Energy,
    /// Currency used for bidding in both auctions.
    Coins,
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// A player skill. Levels start at 1 (except [`Skill::Auction`], which
/// starts at 0) and increase only by winning the skill auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    /// Multiplier on the global minimum start bid for market listings.
    MinBid,
    /// Multiplier on the global maximum start bid for market listings.
    MaxBid,
    /// Energy skill.
    Energy,
    /// Multiplier for energy-to-coins conversion.
    MoneyConversion,
    /// Multiplier for energy-to-food conversion.
    FoodConversion,
    /// Weight for the share of skill-auction payouts.
    Auction,
}

impl Skill {
    /// All skills in registry order.
    pub const ALL: [Self; 6] = [
        Self::MinBid,
        Self::MaxBid,
        Self::Energy,
        Self::MoneyConversion,
        Self::FoodConversion,
        Self::Auction,
    ];

    /// Position of this skill in registry order.
    pub const fn index(self) -> usize {
        match self {
            Self::MinBid => 0,
            Self::MaxBid => 1,
            Self::Energy => 2,
            Self::MoneyConversion => 3,
            Self::FoodConversion => 4,
            Self::Auction => 5,
        }
    }

    /// Look a skill up by its registry position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The external name of the skill (e.g. `"food_conversion_skill"`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::MinBid => "min_bid_skill",
            Self::MaxBid => "max_bid_skill",
            Self::Energy => "energy_skill",
            Self::MoneyConversion => "money_conversion_skill",
            Self::FoodConversion => "food_conversion_skill",
            Self::Auction => "auction_skill",
        }
    }
}

impl core::fmt::Display for Skill {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Food votes
// ---------------------------------------------------------------------------

/// A vote to move one of the global start-bid bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodVote {
    /// Raise `global_min_bid` by one.
    IncreaseMinBid,
    /// Lower `global_min_bid` by one.
    DecreaseMinBid,
    /// Raise `global_max_bid` by one.
    IncreaseMaxBid,
    /// Lower `global_max_bid` by one.
    DecreaseMaxBid,
}

impl FoodVote {
    /// All vote categories in tally order.
    pub const ALL: [Self; 4] = [
        Self::IncreaseMinBid,
        Self::DecreaseMinBid,
        Self::IncreaseMaxBid,
        Self::DecreaseMaxBid,
    ];

    /// Position of this category in tally order.
    pub const fn index(self) -> usize {
        match self {
            Self::IncreaseMinBid => 0,
            Self::DecreaseMinBid => 1,
            Self::IncreaseMaxBid => 2,
            Self::DecreaseMaxBid => 3,
        }
    }

    /// Look a category up by its tally position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The external name of the category.
    pub const fn name(self) -> &'static str {
        match self {
            Self::IncreaseMinBid => "increase_min_bid",
            Self::DecreaseMinBid => "decrease_min_bid",
            Self::IncreaseMaxBid => "increase_max_bid",
            Self::DecreaseMaxBid => "decrease_max_bid",
        }
    }
}

// ---------------------------------------------------------------------------
// Action kinds
// ---------------------------------------------------------------------------

/// The kind of a player action, in codec registry order.
///
/// The registry index is what gets recorded in a player's action memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// No-op.
    DoNothing,
    /// Convert energy into food.
    EnergyToFood,
    /// Vote for the next skill to auction.
    AddVoteForSkillAuction,
    /// Bid coins in the current skill auction.
    AddBidForSkillAuction,
    /// Convert energy into coins.
    EnergyToCoins,
    /// Raise another player's turn priority.
    AddVoteForTurn,
    /// Vote to move a global start-bid bound.
    AddFoodVote,
    /// List food on the market.
    AddToMarket,
    /// Bid coins on a market listing.
    AddBidForFood,
}

impl ActionKind {
    /// All action kinds in registry order.
    pub const ALL: [Self; 9] = [
        Self::DoNothing,
        Self::EnergyToFood,
        Self::AddVoteForSkillAuction,
        Self::AddBidForSkillAuction,
        Self::EnergyToCoins,
        Self::AddVoteForTurn,
        Self::AddFoodVote,
        Self::AddToMarket,
        Self::AddBidForFood,
    ];

    /// Position of this kind in the registry.
    pub const fn index(self) -> u8 {
        match self {
            Self::DoNothing => 0,
            Self::EnergyToFood => 1,
            Self::AddVoteForSkillAuction => 2,
            Self::AddBidForSkillAuction => 3,
            Self::EnergyToCoins => 4,
            Self::AddVoteForTurn => 5,
            Self::AddFoodVote => 6,
            Self::AddToMarket => 7,
            Self::AddBidForFood => 8,
        }
    }

    /// Look a kind up by its registry position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The external name of the action.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DoNothing => "do_nothing",
            Self::EnergyToFood => "energy_to_food",
            Self::AddVoteForSkillAuction => "add_vote_for_skill_auction",
            Self::AddBidForSkillAuction => "add_bid_for_skill_auction",
            Self::EnergyToCoins => "energy_to_coins",
            Self::AddVoteForTurn => "add_vote_for_turn",
            Self::AddFoodVote => "add_food_vote",
            Self::AddToMarket => "add_to_market",
            Self::AddBidForFood => "add_bid_for_food",
        }
    }
}

impl core::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The category of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LedgerEntryType {
    /// Energy spent on a conversion (player -> void).
    EnergySpend,
    /// Food or coins produced by a conversion (world -> player).
    Production,
    /// Food consumed by the turn's food requirement (player -> void).
    Upkeep,
    /// Food or coins changing hands in a market sale (player -> player).
    MarketSale,
    /// Coins paid for a skill level (player -> void).
    SkillPurchase,
    /// Share of a skill-auction bid paid to a holder (world -> player).
    AuctionPayout,
}

/// The type of entity participating in a ledger transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// A player.
    Player,
    /// The world itself (source of production and payouts).
    World,
    /// The void (destination for spending and upkeep).
    Void,
}
