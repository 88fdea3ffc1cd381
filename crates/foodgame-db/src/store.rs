//! The observation sink seam and its in-memory implementation.
//!
//! A store groups observations into *games*. The first write of a session
//! picks a fresh game id (`max(game_id) + 1`, or 1 for an empty store) and
//! every later write reuses it until [`ObservationStore::refresh_game_id`]
//! is called. A record that exactly matches one already stored under the
//! current game id is a duplicate and is skipped unless the caller allows
//! duplicates.

use std::future::Future;

use foodgame_types::ObservationRecord;

use crate::error::DbError;

/// What happened to one stored observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The record was written.
    Inserted {
        /// Row id of the new record.
        id: i64,
        /// Game the record was filed under.
        game_id: i64,
    },
    /// An identical record already exists for this game; nothing written.
    Duplicate {
        /// Game the duplicate belongs to.
        game_id: i64,
    },
}

impl StoreOutcome {
    /// The game id the record belongs to.
    pub const fn game_id(self) -> i64 {
        match self {
            Self::Inserted { game_id, .. } | Self::Duplicate { game_id } => game_id,
        }
    }
}

/// A sink for per-player observations.
pub trait ObservationStore {
    /// Store one observation under the current game id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backing store fails.
    fn store_observation(
        &mut self,
        record: &ObservationRecord,
        allow_duplicate: bool,
    ) -> impl Future<Output = Result<StoreOutcome, DbError>> + Send;

    /// Forget the cached game id; the next write starts a new game.
    fn refresh_game_id(&mut self);
}

/// One record held by [`MemoryObservationStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObservation {
    /// Row id, starting at 1.
    pub id: i64,
    /// Game the record belongs to.
    pub game_id: i64,
    /// The stored record.
    pub record: ObservationRecord,
}

/// In-process observation store.
#[derive(Debug, Clone, Default)]
pub struct MemoryObservationStore {
    rows: Vec<StoredObservation>,
    game_id: Option<i64>,
}

impl MemoryObservationStore {
    /// An empty store.
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            game_id: None,
        }
    }

    /// Every stored record, in insertion order.
    pub fn rows(&self) -> &[StoredObservation] {
        &self.rows
    }

    /// Records of one game, in insertion order.
    pub fn game(&self, game_id: i64) -> impl Iterator<Item = &StoredObservation> {
        self.rows.iter().filter(move |row| row.game_id == game_id)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn current_game_id(&mut self) -> i64 {
        if let Some(id) = self.game_id {
            return id;
        }
        let next = self
            .rows
            .iter()
            .map(|row| row.game_id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        self.game_id = Some(next);
        next
    }
}

impl ObservationStore for MemoryObservationStore {
    async fn store_observation(
        &mut self,
        record: &ObservationRecord,
        allow_duplicate: bool,
    ) -> Result<StoreOutcome, DbError> {
        let game_id = self.current_game_id();

        if !allow_duplicate
            && self
                .rows
                .iter()
                .any(|row| row.game_id == game_id && row.record == *record)
        {
            tracing::debug!(game_id, uid = %record.uid, "Skipped duplicate observation");
            return Ok(StoreOutcome::Duplicate { game_id });
        }

        let id = i64::try_from(self.rows.len())
            .unwrap_or(i64::MAX)
            .saturating_add(1);
        self.rows.push(StoredObservation {
            id,
            game_id,
            record: record.clone(),
        });
        Ok(StoreOutcome::Inserted { id, game_id })
    }

    fn refresh_game_id(&mut self) {
        self.game_id = None;
    }
}

#[cfg(test)]
mod tests {
    use foodgame_agents::EconomyConfig;
    use foodgame_core::Game;

    use super::*;

    fn record(food: i64) -> Option<ObservationRecord> {
        let mut game = Game::new(EconomyConfig::default(), Some(1));
        let id = game.add_player(Some("a"));
        game.add_player(Some("b"));
        if let Some(p) = game.player_mut(&id) {
            p.food = food;
        }
        game.observe(&id).map(|obs| obs.to_record())
    }

    #[tokio::test]
    async fn first_game_id_is_one() {
        let Some(rec) = record(10) else {
            return;
        };
        let mut store = MemoryObservationStore::new();
        let outcome = store.store_observation(&rec, false).await;
        assert!(matches!(outcome, Ok(StoreOutcome::Inserted { id: 1, game_id: 1 })));
    }

    #[tokio::test]
    async fn identical_record_is_a_duplicate() {
        let Some(rec) = record(10) else {
            return;
        };
        let mut store = MemoryObservationStore::new();
        let _ = store.store_observation(&rec, false).await;

        let again = store.store_observation(&rec, false).await;
        assert!(matches!(again, Ok(StoreOutcome::Duplicate { game_id: 1 })));
        assert_eq!(store.len(), 1);

        let forced = store.store_observation(&rec, true).await;
        assert!(matches!(forced, Ok(StoreOutcome::Inserted { id: 2, .. })));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn different_records_are_both_stored() {
        let (Some(a), Some(b)) = (record(10), record(9)) else {
            return;
        };
        let mut store = MemoryObservationStore::new();
        let _ = store.store_observation(&a, false).await;
        let second = store.store_observation(&b, false).await;
        assert!(second.is_ok_and(|o| o.game_id() == 1));
        assert_eq!(store.game(1).count(), 2);
    }

    #[tokio::test]
    async fn refresh_starts_a_new_game() {
        let Some(rec) = record(10) else {
            return;
        };
        let mut store = MemoryObservationStore::new();
        let _ = store.store_observation(&rec, false).await;
        store.refresh_game_id();

        // the same record is not a duplicate under a new game id
        let outcome = store.store_observation(&rec, false).await;
        assert!(matches!(outcome, Ok(StoreOutcome::Inserted { game_id: 2, .. })));
        assert_eq!(store.game(2).count(), 1);
    }
}
