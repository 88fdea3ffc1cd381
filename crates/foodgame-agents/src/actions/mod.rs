//! Action validation and execution for player actions.
//!
//! # Submodules
//!
//! - [`validation`] -- The 4-stage validation pipeline.
//! - [`handlers`] -- Execution logic for each action kind.

pub mod handlers;
pub mod validation;
