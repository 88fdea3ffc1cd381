//! Turn resolution engine for the food game.
//!
//! This crate owns the turn cycle: players queue ten actions each, and once
//! every queue is full the turn resolves in three phases (Collecting,
//! Resolving, Maintenance).
//!
//! # Modules
//!
//! - [`clock`] -- Day counter and the daily food requirement draw.
//! - [`codec`] -- Mixed-radix bijection between scalar action ids and raw
//!   actions, plus parameter resolution against live state.
//! - [`config`] -- Configuration loading from `foodgame-config.yaml` into
//!   strongly-typed structs.
//! - [`decision`] -- [`DecisionSource`] trait with scripted opponents.
//! - [`market`] -- Food market clearing.
//! - [`observation`] -- Per-player observation assembly.
//! - [`priority`] -- Turn order from player priorities.
//! - [`runner`] -- Whole-game loop and final ranking.
//! - [`skill_auction`] -- Rotating skill auction and payouts.
//! - [`state`] -- [`EngineState`], the mutable state of one game.
//! - [`turn`] -- [`Game`], the turn orchestrator.
//! - [`votes`] -- Food vote resolution.
//!
//! [`DecisionSource`]: decision::DecisionSource
//! [`EngineState`]: state::EngineState
//! [`Game`]: turn::Game

pub mod clock;
pub mod codec;
pub mod config;
pub mod decision;
pub mod market;
pub mod observation;
pub mod priority;
pub mod runner;
pub mod skill_auction;
pub mod state;
pub mod turn;
pub mod votes;

pub use codec::Codec;
pub use config::GameConfig;
pub use decision::{Decision, DecisionSource, NothingDecisionSource, RandomDecisionSource};
pub use state::EngineState;
pub use turn::{ACTIONS_PER_TURN, Game, SubmitError, SubmitOutcome, TurnSummary};
