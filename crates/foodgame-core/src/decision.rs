//! Decision source trait and scripted implementations.
//!
//! Whoever drives a player (a learning agent, a scripted bot, a test) is
//! asked for one action at a time through [`DecisionSource::decide`]. The
//! answer is either a scalar action id or a raw action; both go through the
//! codec when submitted, exactly as an external client's would.

use foodgame_types::{ActionId, ActionKind, Observation, PlayerId, RawAction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::codec::Codec;

/// One decided action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// A scalar action id.
    Id(ActionId),
    /// A raw action with one-based parameters.
    Raw(RawAction),
}

/// A source of player decisions.
pub trait DecisionSource {
    /// Choose the next action for `player` given what it can see.
    fn decide(&mut self, player: &PlayerId, observation: &Observation, codec: &Codec) -> Decision;
}

/// Always submits the no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NothingDecisionSource;

impl NothingDecisionSource {
    /// Create a new no-op source.
    pub const fn new() -> Self {
        Self
    }
}

impl DecisionSource for NothingDecisionSource {
    fn decide(&mut self, _player: &PlayerId, _observation: &Observation, _codec: &Codec) -> Decision {
        Decision::Id(0)
    }
}

/// Kinds a random opponent picks from: every kind except food bids.
const RANDOM_KINDS: usize = 8;

/// Largest parameter value a random opponent draws.
const RANDOM_PARAM_MAX: u32 = 10;

/// Picks a random action kind with small random parameters.
///
/// Parameters are drawn from `1..=10` (capped at each slot's cardinality),
/// so percentages stay small and player indices usually exist.
#[derive(Debug, Clone)]
pub struct RandomDecisionSource {
    rng: StdRng,
}

impl RandomDecisionSource {
    /// A source seeded for reproducible play.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A source seeded from the OS.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl DecisionSource for RandomDecisionSource {
    fn decide(&mut self, _player: &PlayerId, _observation: &Observation, codec: &Codec) -> Decision {
        let index = self.rng.random_range(0..RANDOM_KINDS);
        let Some(spec) = ActionKind::from_index(index).and_then(|kind| codec.spec(kind)) else {
            return Decision::Raw(RawAction::do_nothing());
        };
        let params = spec
            .params
            .iter()
            .map(|param| {
                self.rng
                    .random_range(1..=param.cardinality.clamp(1, RANDOM_PARAM_MAX))
            })
            .collect();
        Decision::Raw(RawAction::new(spec.kind, params))
    }
}
