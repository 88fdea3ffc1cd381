//! Seats the configured players and picks the opponent policy.

use foodgame_core::config::{GameConfig, OpponentMode};
use foodgame_core::{DecisionSource, Game, NothingDecisionSource, RandomDecisionSource};
use foodgame_types::PlayerId;
use tracing::info;

/// Offset between the game seed and the opponent seed, so the two random
/// streams differ.
const OPPONENT_SEED_OFFSET: u64 = 0x9E37_79B9;

/// Add `config.world.players` players named `player-1`, `player-2`, ...
pub fn seat_players(game: &mut Game, config: &GameConfig) -> Vec<PlayerId> {
    let ids: Vec<PlayerId> = (1..=config.world.players)
        .map(|n| game.add_player(Some(&format!("player-{n}"))))
        .collect();
    info!(players = ids.len(), "Players seated");
    ids
}

/// The decision source for every seated player.
pub fn opponent_source(config: &GameConfig) -> Box<dyn DecisionSource> {
    match config.opponents.mode {
        OpponentMode::Nothing => Box::new(NothingDecisionSource::new()),
        OpponentMode::Random => match config.world.seed {
            Some(seed) => Box::new(RandomDecisionSource::seeded(
                seed.wrapping_add(OPPONENT_SEED_OFFSET),
            )),
            None => Box::new(RandomDecisionSource::from_os_rng()),
        },
    }
}
