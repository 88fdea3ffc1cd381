//! End-of-turn upkeep for a single player.
//!
//! Runs when a player queues its tenth action of a turn:
//!
//! 1. Consume the food requirement (food may go negative)
//! 2. Re-evaluate `alive` as `food >= 0`
//! 3. Add `(coins + food) * (day + 1)` to the score
//! 4. Mark the turn as ended
//!
//! A player found dead here is reported as dead on every such evaluation,
//! not only on the turn it died; the game-wide dead counter grows by one
//! each time.
//!
//! All arithmetic uses checked operations. No panics, no silent overflow.

use foodgame_types::PlayerState;

use crate::error::ActionError;

/// What changed when a player's turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpkeepResult {
    /// Food consumed by the requirement.
    pub food_consumed: i64,
    /// The player is dead after upkeep.
    pub dead: bool,
    /// The player went from alive to dead.
    pub died: bool,
    /// Score added this turn.
    pub score_delta: i64,
}

/// Apply end-of-turn upkeep to a player.
pub fn end_turn(
    player: &mut PlayerState,
    food_requirement: i64,
    day: u64,
) -> Result<UpkeepResult, ActionError> {
    let food = player
        .food
        .checked_sub(food_requirement)
        .ok_or_else(|| ActionError::overflow("food upkeep"))?;

    let day_weight = i64::try_from(day)
        .ok()
        .and_then(|d| d.checked_add(1))
        .ok_or_else(|| ActionError::overflow("score day weight"))?;
    let score_delta = player
        .coins
        .checked_add(food)
        .and_then(|holdings| holdings.checked_mul(day_weight))
        .ok_or_else(|| ActionError::overflow("score increment"))?;
    let score = player
        .score
        .checked_add(score_delta)
        .ok_or_else(|| ActionError::overflow("score total"))?;

    let was_alive = player.alive;
    let alive = food >= 0;

    player.food = food;
    player.alive = alive;
    player.score = score;
    player.turn_ended = true;

    Ok(UpkeepResult {
        food_consumed: food_requirement,
        dead: !alive,
        died: was_alive && !alive,
        score_delta,
    })
}
