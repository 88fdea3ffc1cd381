//! Shared type definitions for the food game economy engine.
//!
//! This crate is the single source of truth for the data types used across
//! the workspace.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier types for players, market listings, ledger entries
//! - [`enums`] -- Enumeration types (resources, skills, votes, action kinds, ledger)
//! - [`structs`] -- Core entity structs (players, listings, ledger entries)
//! - [`actions`] -- Scalar, raw, and resolved action types
//! - [`observation`] -- Observation payload and its persisted record form

pub mod actions;
pub mod enums;
pub mod ids;
pub mod observation;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, ActionId, RawAction};
pub use enums::{ActionKind, EntityType, FoodVote, LedgerEntryType, Resource, Skill};
pub use ids::{LedgerEntryId, MarketId, PlayerId};
pub use observation::{
    FIXED_OBSERVATION_WIDTH, MarketSlot, OBSERVED_LISTINGS, Observation, ObservationRecord,
};
pub use structs::{
    ActionMemory, LedgerEntry, MarketListing, PlayerState, SkillLevels, TurnPriority,
};
