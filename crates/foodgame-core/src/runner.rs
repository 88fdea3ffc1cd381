//! Game loop runner.
//!
//! This module provides [`run_game`], which drives whole turns through a
//! [`DecisionSource`] until the game ends or a day limit is reached, and
//! [`play_turn`], the single-turn step it wraps. Callers that need to do
//! asynchronous work between turns (persisting observations, say) drive
//! [`play_turn`] themselves and use [`end_reason`] as the loop condition.

use std::cmp::Reverse;

use foodgame_types::PlayerId;
use tracing::{info, warn};

use crate::decision::{Decision, DecisionSource};
use crate::turn::{ACTIONS_PER_TURN, Game, SubmitError, TurnSummary};

/// Errors that can occur while running a game.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A submission was refused.
    #[error("submission failed: {source}")]
    Submit {
        /// The underlying submission error.
        #[from]
        source: SubmitError,
    },

    /// Every player submitted a full turn but the turn did not resolve.
    #[error("turn on day {day} did not resolve")]
    Stalled {
        /// The day that failed to resolve.
        day: u64,
    },
}

/// Why a game run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// At most one player is alive.
    GameEnded,
    /// The configured day limit was reached.
    MaxDaysReached,
}

/// One line of the final standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRanking {
    /// The player.
    pub player: PlayerId,
    /// Final score.
    pub score: i64,
    /// Whether the player was alive at the end.
    pub alive: bool,
}

/// Result of a game run.
#[derive(Debug)]
pub struct GameResult {
    /// The reason the run ended.
    pub end_reason: EndReason,
    /// The last turn summary, if any turn resolved.
    pub final_summary: Option<TurnSummary>,
    /// Number of turns resolved by this run.
    pub turns: u64,
    /// Players by descending score.
    pub ranking: Vec<PlayerRanking>,
}

/// Callback invoked after each resolved turn.
pub trait TurnCallback {
    /// Called after a turn resolves.
    fn on_turn(&mut self, summary: &TurnSummary, game: &Game);
}

/// A no-op turn callback.
pub struct NoOpCallback;

impl TurnCallback for NoOpCallback {
    fn on_turn(&mut self, _summary: &TurnSummary, _game: &Game) {}
}

/// Why the game should stop now, or `None` to keep playing.
///
/// `max_days` counts resolved turns: with a limit of 5 the run stops once
/// day 6 has begun.
pub fn end_reason(game: &Game, max_days: u64) -> Option<EndReason> {
    if game.game_ended() {
        Some(EndReason::GameEnded)
    } else if game.day() > max_days {
        Some(EndReason::MaxDaysReached)
    } else {
        None
    }
}

/// Ask `source` for ten actions per player and submit them.
///
/// Returns the summary of the turn the last submission resolved.
///
/// # Errors
///
/// Returns [`RunnerError::Submit`] if a roster player is refused.
pub fn play_turn(
    game: &mut Game,
    source: &mut dyn DecisionSource,
) -> Result<Option<TurnSummary>, RunnerError> {
    let players = game.players().to_vec();
    let mut resolved = None;

    for player in &players {
        for _ in 0..ACTIONS_PER_TURN {
            let observation = game
                .observe(player)
                .ok_or_else(|| SubmitError::UnknownPlayer(player.clone()))?;
            let outcome = match source.decide(player, &observation, game.codec()) {
                Decision::Id(id) => game.submit_id(player, id)?,
                Decision::Raw(raw) => game.submit_raw(player, &raw)?,
            };
            if outcome.turn.is_some() {
                resolved = outcome.turn;
            }
        }
    }

    Ok(resolved)
}

/// Play turns until the game ends or `max_days` turns have resolved.
///
/// # Errors
///
/// Returns [`RunnerError`] if a submission fails or a turn does not
/// resolve.
pub fn run_game(
    game: &mut Game,
    source: &mut dyn DecisionSource,
    max_days: u64,
    callback: &mut dyn TurnCallback,
) -> Result<GameResult, RunnerError> {
    let mut final_summary = None;
    let mut turns: u64 = 0;

    info!(
        players = game.players().len(),
        day = game.day(),
        max_days,
        "Game starting"
    );

    let end_reason = loop {
        if let Some(reason) = end_reason(game, max_days) {
            break reason;
        }
        let day = game.day();
        let Some(summary) = play_turn(game, source)? else {
            return Err(RunnerError::Stalled { day });
        };
        turns = turns.saturating_add(1);
        callback.on_turn(&summary, game);
        final_summary = Some(summary);
    };

    Ok(GameResult {
        end_reason,
        final_summary,
        turns,
        ranking: ranking(game),
    })
}

/// Players by descending score; ties keep join order.
pub fn ranking(game: &Game) -> Vec<PlayerRanking> {
    let mut ranking: Vec<PlayerRanking> = game
        .state()
        .roster
        .iter()
        .map(|p| PlayerRanking {
            player: p.id.clone(),
            score: p.score,
            alive: p.alive,
        })
        .collect();
    ranking.sort_by_key(|r| Reverse(r.score));
    ranking
}

/// Log how a run ended and the final standings.
pub fn log_game_end(result: &GameResult) {
    info!(
        reason = ?result.end_reason,
        turns = result.turns,
        final_day = result.final_summary.as_ref().map(|s| s.day),
        players_alive = result.final_summary.as_ref().map(|s| s.players_alive),
        "Game ended"
    );

    if result.final_summary.is_none() {
        warn!("Game ended with no turns resolved");
    }
    for (place, entry) in result.ranking.iter().enumerate() {
        info!(
            place = place.saturating_add(1),
            player = %entry.player,
            score = entry.score,
            alive = entry.alive,
            "Final standing"
        );
    }
}

#[cfg(test)]
mod tests {
    use foodgame_agents::EconomyConfig;

    use super::*;
    use crate::decision::{NothingDecisionSource, RandomDecisionSource};

    fn game(players: usize) -> Game {
        let mut game = Game::new(EconomyConfig::default(), Some(3));
        for _ in 0..players {
            game.add_player(None);
        }
        game
    }

    #[test]
    fn play_turn_resolves_exactly_one_turn() {
        let mut game = game(3);
        let summary = play_turn(&mut game, &mut NothingDecisionSource::new());
        assert!(summary.is_ok_and(|s| s.is_some_and(|s| s.day == 1)));
        assert_eq!(game.day(), 2);
    }

    #[test]
    fn bounded_by_max_days() {
        let mut game = game(2);
        let result = run_game(&mut game, &mut NothingDecisionSource::new(), 3, &mut NoOpCallback);
        let Ok(result) = result else {
            return;
        };
        // doing nothing starves nobody for three turns: requirements stay small
        assert_eq!(result.turns, 3);
        assert_eq!(result.end_reason, EndReason::MaxDaysReached);
        assert_eq!(result.ranking.len(), 2);
    }

    #[test]
    fn single_player_game_has_ended() {
        let mut game = game(1);
        let result = run_game(&mut game, &mut NothingDecisionSource::new(), 10, &mut NoOpCallback);
        assert!(result.is_ok_and(|r| r.end_reason == EndReason::GameEnded && r.turns == 0));
    }

    #[test]
    fn callback_is_called_per_turn() {
        struct CountCallback {
            count: u64,
        }
        impl TurnCallback for CountCallback {
            fn on_turn(&mut self, _summary: &TurnSummary, _game: &Game) {
                self.count = self.count.saturating_add(1);
            }
        }

        let mut game = game(4);
        let mut source = RandomDecisionSource::seeded(21);
        let mut cb = CountCallback { count: 0 };
        let result = run_game(&mut game, &mut source, 5, &mut cb);
        assert!(result.is_ok_and(|r| r.turns == cb.count));
    }

    #[test]
    fn ranking_is_sorted_by_score() {
        let mut game = game(3);
        let ids = game.players().to_vec();
        for (id, score) in ids.iter().zip([5, 30, 10]) {
            if let Some(p) = game.player_mut(id) {
                p.score = score;
            }
        }
        let scores: Vec<i64> = ranking(&game).iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![30, 10, 5]);
    }
}
