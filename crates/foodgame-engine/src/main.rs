//! Game engine binary for the food game.
//!
//! Wires together configuration, the turn orchestrator, scripted opponents,
//! and the optional observation sink, then plays one game to the end.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `foodgame-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Create the game and seat the players
//! 4. Pick the opponent decision source
//! 5. Connect to `PostgreSQL` if observation persistence is enabled
//! 6. Play turns until the game ends or the day limit is reached
//! 7. Log the final ranking

mod error;
mod persist;
mod seating;

use std::path::Path;

use foodgame_core::Game;
use foodgame_core::config::GameConfig;
use foodgame_core::runner::{self, GameResult, RunnerError};
use foodgame_db::{ObservationStore, PostgresConfig, PostgresObservationStore, PostgresPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "foodgame-config.yaml";

/// Application entry point for the game engine.
///
/// # Errors
///
/// Returns an error if configuration, persistence, or the game loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        seed = config.world.seed,
        players = config.world.players,
        max_days = config.world.max_days,
        opponents = ?config.opponents.mode,
        "foodgame-engine starting"
    );

    let mut game = Game::from_config(&config);
    seating::seat_players(&mut game, &config);
    let mut source = seating::opponent_source(&config);

    let (pool, mut store) = if config.infrastructure.persist_observations {
        let (pool, store) = connect_store(&config).await?;
        (Some(pool), Some(store))
    } else {
        (None, None)
    };

    let mut final_summary = None;
    let mut turns: u64 = 0;
    let end_reason = loop {
        if let Some(reason) = runner::end_reason(&game, config.world.max_days) {
            break reason;
        }
        let day = game.day();
        let summary = runner::play_turn(&mut game, source.as_mut())?
            .ok_or_else(|| EngineError::from(RunnerError::Stalled { day }))?;
        turns = turns.saturating_add(1);

        if let Some(store) = store.as_mut() {
            persist::persist_observations(&game, store).await?;
        }
        final_summary = Some(summary);
    };

    let result = GameResult {
        end_reason,
        final_summary,
        turns,
        ranking: runner::ranking(&game),
    };
    runner::log_game_end(&result);

    if let Some(pool) = pool {
        pool.close().await;
    }

    info!(
        end_reason = ?result.end_reason,
        turns = result.turns,
        "foodgame-engine shutdown complete"
    );

    Ok(())
}

/// Load the game configuration from [`CONFIG_FILE`].
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<GameConfig, EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok(GameConfig::from_file(config_path)?)
    } else {
        Ok(GameConfig::default())
    }
}

/// Connect to `PostgreSQL`, apply migrations, and start a new game id.
async fn connect_store(
    config: &GameConfig,
) -> Result<(PostgresPool, PostgresObservationStore), EngineError> {
    let pool = PostgresPool::connect(&PostgresConfig::new(&config.infrastructure.postgres_url))
        .await?;
    pool.run_migrations().await?;
    let mut store = pool.observation_store();
    store.refresh_game_id();
    Ok((pool, store))
}
