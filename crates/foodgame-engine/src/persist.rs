//! Per-turn observation persistence.

use foodgame_core::Game;
use foodgame_db::{DbError, ObservationStore, StoreOutcome};
use tracing::debug;

/// Counts from one persistence pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistStats {
    /// Records written.
    pub inserted: usize,
    /// Records skipped as duplicates.
    pub duplicates: usize,
}

/// Store every player's current observation.
///
/// # Errors
///
/// Returns the first [`DbError`] the store reports.
pub async fn persist_observations<S: ObservationStore + Send>(
    game: &Game,
    store: &mut S,
) -> Result<PersistStats, DbError> {
    let mut stats = PersistStats::default();
    for id in game.players() {
        let Some(observation) = game.observe(id) else {
            continue;
        };
        match store.store_observation(&observation.to_record(), false).await? {
            StoreOutcome::Inserted { .. } => stats.inserted = stats.inserted.saturating_add(1),
            StoreOutcome::Duplicate { .. } => {
                stats.duplicates = stats.duplicates.saturating_add(1);
            }
        }
    }
    debug!(
        day = game.day(),
        inserted = stats.inserted,
        duplicates = stats.duplicates,
        "Observations persisted"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use foodgame_core::config::GameConfig;
    use foodgame_db::MemoryObservationStore;

    use super::*;

    #[tokio::test]
    async fn stores_one_record_per_player() {
        let mut game = Game::from_config(&GameConfig::default());
        game.add_player(Some("a"));
        game.add_player(Some("b"));
        let mut store = MemoryObservationStore::new();

        let stats = persist_observations(&game, &mut store).await;
        assert!(matches!(stats, Ok(PersistStats { inserted: 2, duplicates: 0 })));

        // nothing changed, so the second pass only finds duplicates
        let again = persist_observations(&game, &mut store).await;
        assert!(matches!(again, Ok(PersistStats { inserted: 0, duplicates: 2 })));
        assert_eq!(store.len(), 2);
    }
}
