//! Player creation and lookup.
//!
//! The [`Roster`] keeps players in join order (which is the order used by
//! observations, player-index action parameters, and priority tie
//! handling) and enforces id uniqueness.

use std::collections::BTreeMap;

use foodgame_types::{PlayerId, PlayerState, Resource};

use crate::config::EconomyConfig;

/// Insertion-ordered collection of every player in a game.
///
/// Players are never removed individually; dead players stay in the roster
/// with `alive == false`.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Player ids in join order.
    order: Vec<PlayerId>,
    /// Player state keyed by id.
    players: BTreeMap<PlayerId, PlayerState>,
}

impl Roster {
    /// Create an empty roster.
    pub const fn new() -> Self {
        Self {
            order: Vec::new(),
            players: BTreeMap::new(),
        }
    }

    /// Add a player with starting resources from `config`.
    ///
    /// Without a username a random UUID v4 is used. A taken username gets
    /// `-1`, `-2`, ... appended until it is unique.
    pub fn add(&mut self, username: Option<&str>, config: &EconomyConfig) -> PlayerId {
        let id = self.unique_id(username);
        let state = PlayerState::new(
            id.clone(),
            config.starting_food,
            config.starting_energy,
            config.starting_coins,
        );
        self.order.push(id.clone());
        self.players.insert(id.clone(), state);
        tracing::debug!(player = %id, players = self.order.len(), "player joined");
        id
    }

    fn unique_id(&self, username: Option<&str>) -> PlayerId {
        let Some(name) = username else {
            let mut id = PlayerId::generate();
            while self.players.contains_key(&id) {
                id = PlayerId::generate();
            }
            return id;
        };

        let mut candidate = PlayerId::named(name);
        let mut suffix: u64 = 1;
        while self.players.contains_key(&candidate) {
            candidate = PlayerId::named(format!("{name}-{suffix}"));
            suffix = suffix.saturating_add(1);
        }
        candidate
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a player with this id exists.
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    /// Look a player up by id.
    pub fn get(&self, id: &PlayerId) -> Option<&PlayerState> {
        self.players.get(id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: &PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(id)
    }

    /// Mutable lookup by id together with the ordered list of all ids.
    ///
    /// Handlers need both: the acting player's state and the set of valid
    /// vote targets.
    pub fn get_mut_with_ids(&mut self, id: &PlayerId) -> Option<(&mut PlayerState, &[PlayerId])> {
        let ids = self.order.as_slice();
        self.players.get_mut(id).map(|p| (p, ids))
    }

    /// The id at a join-order position.
    pub fn id_at(&self, position: usize) -> Option<&PlayerId> {
        self.order.get(position)
    }

    /// Player ids in join order.
    pub fn ids(&self) -> &[PlayerId] {
        &self.order
    }

    /// Players in join order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerState> {
        self.order.iter().filter_map(|id| self.players.get(id))
    }

    /// Mutable access to every player (id order, not join order).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlayerState> {
        self.players.values_mut()
    }

    /// Number of players currently flagged dead.
    pub fn dead_count(&self) -> usize {
        self.players.values().filter(|p| !p.alive).count()
    }

    /// Economy-wide totals per resource.
    pub fn totals(&self) -> BTreeMap<Resource, i64> {
        let mut totals = BTreeMap::new();
        for resource in [Resource::Food, Resource::Energy, Resource::Coins] {
            let sum = self
                .players
                .values()
                .fold(0_i64, |acc, p| acc.saturating_add(p.resource(resource)));
            totals.insert(resource, sum);
        }
        totals
    }

    /// Remove every player.
    pub fn clear(&mut self) {
        self.order.clear();
        self.players.clear();
    }
}
