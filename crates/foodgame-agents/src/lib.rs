//! Player state, shared boards, and action handlers for the food game.
//!
//! This crate contains the logic layer for players -- everything that
//! operates on player state and the shared boards without touching I/O or
//! randomness. It sits between `foodgame-types` (the data structures) and
//! `foodgame-core` (the turn orchestrator).
//!
//! # Modules
//!
//! - [`actions`] -- Action validation and execution.
//! - [`auction`] -- Pending skill-auction bids ([`SkillBids`])
//! - [`boards`] -- Every board player actions write to ([`Boards`])
//! - [`config`] -- Starting resources and bid bounds ([`EconomyConfig`])
//! - [`error`] -- Error types for player actions ([`ActionError`])
//! - [`market`] -- Food listings and bid buckets ([`FoodMarket`], [`FoodBids`])
//! - [`roster`] -- Insertion-ordered player registry ([`Roster`])
//! - [`skills`] -- Conversion yields, start-bid bounds, level-ups
//! - [`upkeep`] -- End-of-turn food upkeep and scoring
//! - [`votes`] -- Vote tallies for skills and bid bounds

pub mod actions;
pub mod auction;
pub mod boards;
pub mod config;
pub mod error;
pub mod market;
pub mod roster;
pub mod skills;
pub mod upkeep;
pub mod votes;

// Re-export primary types at crate root for convenience.
pub use actions::handlers::{ExecutionContext, HandlerResult, execute_action};
pub use actions::validation::{ValidationContext, validate_action};
pub use auction::SkillBids;
pub use boards::Boards;
pub use config::EconomyConfig;
pub use error::ActionError;
pub use market::{FoodBids, FoodMarket, ListingBids, MAX_MARKET_LISTINGS};
pub use roster::Roster;
pub use upkeep::{UpkeepResult, end_turn};
pub use votes::{Ballot, FoodVoteTally, SkillVoteTally, VoteTally};
