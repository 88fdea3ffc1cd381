//! Skill effects: conversion yields, start-bid bounds, and level-ups.
//!
//! # Formulas
//!
//! - Conversion yield = `(2 * amount - 1) * conversion_skill`
//! - Allowed start bid = `global_min_bid * min_bid_skill ..= global_max_bid * max_bid_skill`
//!
//! Skill levels only grow, one level per skill-auction win.

use foodgame_types::{Skill, SkillLevels};

use crate::error::ActionError;

/// Output of converting `amount` energy at the given skill level.
pub fn conversion_yield(amount: i64, skill_level: u32) -> Result<i64, ActionError> {
    amount
        .checked_mul(2)
        .and_then(|v| v.checked_sub(1))
        .and_then(|v| v.checked_mul(i64::from(skill_level)))
        .ok_or_else(|| ActionError::overflow("conversion yield"))
}

/// The inclusive start-bid range a player may list at.
pub fn start_bid_bounds(
    skills: &SkillLevels,
    global_min_bid: i64,
    global_max_bid: i64,
) -> Result<(i64, i64), ActionError> {
    let min = global_min_bid
        .checked_mul(i64::from(skills.min_bid))
        .ok_or_else(|| ActionError::overflow("min start bid"))?;
    let max = global_max_bid
        .checked_mul(i64::from(skills.max_bid))
        .ok_or_else(|| ActionError::overflow("max start bid"))?;
    Ok((min, max))
}

/// Raise a skill by one level, returning the new level.
pub fn raise_skill(skills: &mut SkillLevels, skill: Skill) -> Result<u32, ActionError> {
    let level = skills.get_mut(skill);
    *level = level
        .checked_add(1)
        .ok_or_else(|| ActionError::overflow("skill level"))?;
    Ok(*level)
}
