//! The mutable state of one game.
//!
//! Everything a turn reads or writes lives in [`EngineState`]. A game owns
//! exactly one value; independent games share nothing.

use foodgame_agents::{Boards, EconomyConfig, Roster};
use foodgame_ledger::Ledger;
use foodgame_types::Skill;

use crate::clock::DayClock;

/// Skill on auction when a game starts.
pub const INITIAL_SKILL_AUCTION: Skill = Skill::FoodConversion;

/// Engine state of one game.
#[derive(Debug)]
pub struct EngineState {
    /// Every player, in join order.
    pub roster: Roster,
    /// Listings, bids, and vote tallies.
    pub boards: Boards,
    /// The skill currently on auction.
    pub skill_auction: Skill,
    /// Global lower start-bid bound.
    pub global_min_bid: i64,
    /// Global upper start-bid bound.
    pub global_max_bid: i64,
    /// Food every player consumes when its turn ends.
    pub food_requirement: i64,
    /// The day counter.
    pub clock: DayClock,
    /// End-of-turn evaluations that left a player dead, summed over the game.
    pub dead_players: usize,
    /// Every resource transfer of this game.
    pub ledger: Ledger,
}

impl EngineState {
    /// Fresh state with the bid bounds from `economy`.
    pub fn new(economy: &EconomyConfig) -> Self {
        Self {
            roster: Roster::new(),
            boards: Boards::new(),
            skill_auction: INITIAL_SKILL_AUCTION,
            global_min_bid: economy.global_min_bid,
            global_max_bid: economy.global_max_bid,
            food_requirement: 0,
            clock: DayClock::new(),
            dead_players: 0,
            ledger: Ledger::new(),
        }
    }

    /// The current day.
    pub const fn day(&self) -> u64 {
        self.clock.day()
    }

    /// Whether the game is over.
    ///
    /// `dead_players >= players - 1`, so a game with a single player (or
    /// none) has always ended.
    pub fn game_ended(&self) -> bool {
        self.dead_players >= self.roster.len().saturating_sub(1)
    }
}
