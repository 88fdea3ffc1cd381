//! Observation payloads delivered to players and persisted for analysis.
//!
//! The observation is the **only** information a player policy receives
//! about the game. Its flattened vector form has a fixed layout:
//!
//! | Slot | Width |
//! |---|---|
//! | action memory | 20 |
//! | food, energy, coins | 3 |
//! | skills (registry order) | 6 |
//! | alive | 1 |
//! | market (amount, start bid) | 200 |
//! | food requirement, day, global min bid, global max bid | 4 |
//! | other players' scores | n - 1 |
//! | other players' alive flags | n - 1 |
//! | own score | 1 |
//!
//! The economy scalars follow the market block, and the market block shows
//! every open listing rather than only the observer's own. Consumers that
//! expect scalars ahead of the market, or a per-seller market view, must
//! reorder or filter on their side.

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::structs::SkillLevels;

/// Number of market listings visible in an observation.
pub const OBSERVED_LISTINGS: usize = 100;

/// Vector width of everything except the per-opponent slots, own score
/// included.
pub const FIXED_OBSERVATION_WIDTH: usize = 235;

/// One visible market listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketSlot {
    /// Food offered.
    pub amount: i64,
    /// Minimum price.
    pub start_bid: i64,
}

/// Everything one player can see at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// The observing player.
    pub player: PlayerId,
    /// The latest twenty action kind indices, oldest first.
    pub action_memory: Vec<u8>,
    /// Food held.
    pub food: i64,
    /// Energy held.
    pub energy: i64,
    /// Coins held.
    pub coins: i64,
    /// Skill levels.
    pub skills: SkillLevels,
    /// Whether the player is alive.
    pub alive: bool,
    /// The first [`OBSERVED_LISTINGS`] listings in market order.
    pub market: Vec<MarketSlot>,
    /// Food consumed at the end of the current turn.
    pub food_requirement: i64,
    /// Current day.
    pub day: u64,
    /// Global lower start-bid bound.
    pub global_min_bid: i64,
    /// Global upper start-bid bound.
    pub global_max_bid: i64,
    /// Scores of every other player, in roster order.
    pub other_scores: Vec<i64>,
    /// Alive flags of every other player, in roster order.
    pub other_alive: Vec<bool>,
    /// Own score.
    pub score: i64,
    /// Whether the most recent submission was invalid.
    pub invalid_action: bool,
}

impl Observation {
    /// Flatten into the fixed-layout integer vector.
    pub fn to_vector(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(
            FIXED_OBSERVATION_WIDTH
                .saturating_add(self.other_scores.len())
                .saturating_add(self.other_alive.len()),
        );
        out.extend(self.action_memory.iter().map(|&k| i64::from(k)));
        out.extend([self.food, self.energy, self.coins]);
        out.extend(self.skills.as_array().iter().map(|&s| i64::from(s)));
        out.push(i64::from(self.alive));
        out.extend(self.market_values());
        out.extend([
            self.food_requirement,
            i64::try_from(self.day).unwrap_or(i64::MAX),
            self.global_min_bid,
            self.global_max_bid,
        ]);
        out.extend(self.other_scores.iter().copied());
        out.extend(self.other_alive.iter().map(|&a| i64::from(a)));
        out.push(self.score);
        out
    }

    /// The 200 market slots, zero padded.
    pub fn market_values(&self) -> Vec<i64> {
        let mut values: Vec<i64> = self
            .market
            .iter()
            .take(OBSERVED_LISTINGS)
            .flat_map(|slot| [slot.amount, slot.start_bid])
            .collect();
        values.resize(OBSERVED_LISTINGS.saturating_mul(2), 0);
        values
    }

    /// Convert into the flat record stored by observation sinks.
    pub fn to_record(&self) -> ObservationRecord {
        ObservationRecord {
            uid: self.player.clone(),
            alive: self.alive,
            food: self.food,
            energy: self.energy,
            coins: self.coins,
            score: self.score,
            other_scores: self.other_scores.clone(),
            day: self.day,
            food_requirement: self.food_requirement,
            skills: self.skills,
            global_min_bid: self.global_min_bid,
            global_max_bid: self.global_max_bid,
            food_market: self.market_values(),
            players_alive: self.other_alive.clone(),
            action_memory: self.action_memory.clone(),
        }
    }
}

/// Flat, storage-friendly form of an [`Observation`].
///
/// Two records are duplicates iff every field is equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// The observing player.
    pub uid: PlayerId,
    /// Whether the player is alive.
    pub alive: bool,
    /// Food held.
    pub food: i64,
    /// Energy held.
    pub energy: i64,
    /// Coins held.
    pub coins: i64,
    /// Own score.
    pub score: i64,
    /// Scores of every other player.
    pub other_scores: Vec<i64>,
    /// Current day.
    pub day: u64,
    /// Current food requirement.
    pub food_requirement: i64,
    /// Skill levels.
    pub skills: SkillLevels,
    /// Global lower start-bid bound.
    pub global_min_bid: i64,
    /// Global upper start-bid bound.
    pub global_max_bid: i64,
    /// The 200 market values.
    pub food_market: Vec<i64>,
    /// Alive flags of every other player.
    pub players_alive: Vec<bool>,
    /// Latest twenty action kinds.
    pub action_memory: Vec<u8>,
}
