//! Core entity structs: players, market listings, and ledger entries.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, LedgerEntryType, Resource, Skill};
use crate::ids::{LedgerEntryId, MarketId, PlayerId};

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// A player's six skill levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillLevels {
    /// Multiplier on `global_min_bid`.
    pub min_bid: u32,
    /// Multiplier on `global_max_bid`.
    pub max_bid: u32,
    /// Energy skill.
    pub energy: u32,
    /// Energy-to-coins multiplier.
    pub money_conversion: u32,
    /// Energy-to-food multiplier.
    pub food_conversion: u32,
    /// Skill-auction payout weight.
    pub auction: u32,
}

impl SkillLevels {
    /// Level of the given skill.
    pub const fn get(&self, skill: Skill) -> u32 {
        match skill {
            Skill::MinBid => self.min_bid,
            Skill::MaxBid => self.max_bid,
            Skill::Energy => self.energy,
            Skill::MoneyConversion => self.money_conversion,
            Skill::FoodConversion => self.food_conversion,
            Skill::Auction => self.auction,
        }
    }

    /// Mutable access to the given skill's level.
    pub const fn get_mut(&mut self, skill: Skill) -> &mut u32 {
        match skill {
            Skill::MinBid => &mut self.min_bid,
            Skill::MaxBid => &mut self.max_bid,
            Skill::Energy => &mut self.energy,
            Skill::MoneyConversion => &mut self.money_conversion,
            Skill::FoodConversion => &mut self.food_conversion,
            Skill::Auction => &mut self.auction,
        }
    }

    /// All six levels in registry order.
    pub const fn as_array(&self) -> [u32; 6] {
        [
            self.min_bid,
            self.max_bid,
            self.energy,
            self.money_conversion,
            self.food_conversion,
            self.auction,
        ]
    }
}

impl Default for SkillLevels {
    fn default() -> Self {
        Self {
            min_bid: 1,
            max_bid: 1,
            energy: 1,
            money_conversion: 1,
            food_conversion: 1,
            auction: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Turn priority
// ---------------------------------------------------------------------------

/// Fixed-point turn priority in hundredths.
///
/// A vote for turn adds [`TurnPriority::VOTE`]; collision perturbation moves
/// the value by [`TurnPriority::STEP`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TurnPriority(pub i64);

impl TurnPriority {
    /// Priority added by one vote for turn (1.00).
    pub const VOTE: i64 = 100;
    /// Smallest perturbation applied on collision (0.01).
    pub const STEP: i64 = 1;

    /// The priority every player starts each turn with.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Raw value in hundredths.
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// Add one vote. Returns `None` on overflow.
    pub const fn with_vote(self) -> Option<Self> {
        match self.0.checked_add(Self::VOTE) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Step by `sign * STEP`. Returns `None` on overflow.
    pub const fn stepped(self, upward: bool) -> Option<Self> {
        let next = if upward {
            self.0.checked_add(Self::STEP)
        } else {
            self.0.checked_sub(Self::STEP)
        };
        match next {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Action memory
// ---------------------------------------------------------------------------

/// Fixed-length record of a player's most recent action kinds.
///
/// Always holds exactly [`ActionMemory::CAPACITY`] entries; pushing evicts
/// the oldest. Starts filled with zeros (`do_nothing`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionMemory {
    entries: VecDeque<u8>,
}

impl ActionMemory {
    /// Number of remembered actions.
    pub const CAPACITY: usize = 20;

    /// A memory filled with `do_nothing` entries.
    pub fn new() -> Self {
        Self {
            entries: std::iter::repeat_n(0, Self::CAPACITY).collect(),
        }
    }

    /// Record an action kind index, evicting the oldest entry.
    pub fn push(&mut self, kind_index: u8) {
        if self.entries.len() >= Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(kind_index);
    }

    /// Number of entries (always [`Self::CAPACITY`]).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.iter().copied()
    }

    /// The most recently recorded entry.
    pub fn latest(&self) -> Option<u8> {
        self.entries.back().copied()
    }
}

impl Default for ActionMemory {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Mutable per-player state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Player identifier.
    pub id: PlayerId,
    /// Food held. May go negative through upkeep, which kills the player.
    pub food: i64,
    /// Energy held.
    pub energy: i64,
    /// Coins held.
    pub coins: i64,
    /// Skill levels.
    pub skills: SkillLevels,
    /// Whether the player survived the latest end-of-turn evaluation.
    pub alive: bool,
    /// Accumulated score.
    pub score: i64,
    /// Ordering weight for the next turn resolution.
    pub turn_priority: TurnPriority,
    /// Set when the player's tenth action of the turn has been queued.
    pub turn_ended: bool,
    /// Set when the most recent submission could not be resolved.
    pub invalid_action: bool,
    /// The latest twenty submitted action kinds.
    pub action_memory: ActionMemory,
}

impl PlayerState {
    /// Create a player with the given starting resources and default skills.
    pub fn new(id: PlayerId, food: i64, energy: i64, coins: i64) -> Self {
        Self {
            id,
            food,
            energy,
            coins,
            skills: SkillLevels::default(),
            alive: true,
            score: 0,
            turn_priority: TurnPriority::zero(),
            turn_ended: false,
            invalid_action: false,
            action_memory: ActionMemory::new(),
        }
    }

    /// Amount of the given resource held.
    pub const fn resource(&self, resource: Resource) -> i64 {
        match resource {
            Resource::Food => self.food,
            Resource::Energy => self.energy,
            Resource::Coins => self.coins,
        }
    }
}

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// Food offered on the market by one player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketListing {
    /// Listing identifier.
    pub id: MarketId,
    /// Player offering the food.
    pub seller: PlayerId,
    /// Food offered.
    pub amount: i64,
    /// Bids must be strictly greater than this.
    pub start_bid: i64,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// An append-only record of a resource transfer.
///
/// Every resource movement produces one entry. Transfers between players
/// must balance at the end of every day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique entry identifier.
    pub id: LedgerEntryId,
    /// The day on which the transfer occurred.
    pub day: u64,
    /// The category of transfer.
    pub entry_type: LedgerEntryType,
    /// Source player, if any (`None` for world-sourced production).
    pub from_entity: Option<PlayerId>,
    /// Type of the source entity.
    pub from_entity_type: Option<EntityType>,
    /// Destination player, if any (`None` for void-consumed resources).
    pub to_entity: Option<PlayerId>,
    /// Type of the destination entity.
    pub to_entity_type: Option<EntityType>,
    /// The resource being transferred.
    pub resource: Resource,
    /// Quantity transferred (always positive).
    pub quantity: i64,
    /// Reason for the transfer (e.g. `"MARKET_SALE"`).
    pub reason: String,
    /// Related market listing, if any.
    pub reference_id: Option<MarketId>,
    /// Real-world timestamp.
    pub created_at: DateTime<Utc>,
}
