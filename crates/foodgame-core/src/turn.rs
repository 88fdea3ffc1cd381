//! Turn orchestration.
//!
//! A [`Game`] owns one [`EngineState`] plus the per-player action queues.
//! Each turn moves through three phases:
//!
//! 1. **Collecting** -- players submit actions one at a time. Each submission
//!    is decoded, resolved against live state, and queued. The tenth
//!    submission ends the player's turn (upkeep, score).
//! 2. **Resolving** -- once every queue is full: vote tallies reset, the
//!    priority order is computed, and every living player's queue executes
//!    in that order. Then the food market, the skill auction, and the food
//!    votes resolve.
//! 3. **Maintenance** -- the next food requirement is drawn, the day
//!    advances, and every player is unblocked.
//!
//! Nothing here panics or aborts a turn: rejected actions are skipped and
//! logged, resolver failures are reported in the [`TurnSummary`].

use std::collections::BTreeMap;

use foodgame_agents::{EconomyConfig, ExecutionContext, HandlerResult, end_turn, execute_action};
use foodgame_ledger::ConservationResult;
use foodgame_types::{
    Action, ActionId, ActionKind, FoodVote, Observation, PlayerId, PlayerState, RawAction,
    Resource,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::codec::{Codec, ResolveContext};
use crate::config::GameConfig;
use crate::market::{MarketReport, resolve_market};
use crate::observation::observe;
use crate::priority::turn_order;
use crate::skill_auction::{SkillAuctionReport, resolve_skill_auction};
use crate::state::EngineState;
use crate::votes::resolve_food_votes;

/// Actions every player queues per turn.
pub const ACTIONS_PER_TURN: usize = 10;

/// Errors a submission can return.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// No player with this id has joined the game.
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),
}

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The submitter's observation after the submission (and after the
    /// turn, if it advanced).
    pub observation: Observation,
    /// Whether the action was queued. `false` when the queue was full.
    pub accepted: bool,
    /// Summary of the turn this submission completed, if any.
    pub turn: Option<TurnSummary>,
}

/// Everything that happened while one turn resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    /// The day that was resolved.
    pub day: u64,
    /// Execution order, highest priority first.
    pub order: Vec<PlayerId>,
    /// Actions that executed.
    pub executed: usize,
    /// Actions rejected by validation.
    pub rejected: usize,
    /// Food market outcomes.
    pub market: MarketReport,
    /// Skill auction outcome.
    pub skill_auction: SkillAuctionReport,
    /// The food vote applied, if any.
    pub food_vote: Option<FoodVote>,
    /// Food requirement drawn for the next turn.
    pub food_requirement: i64,
    /// Players alive after the turn.
    pub players_alive: usize,
    /// Whether holdings moved exactly as the ledger recorded.
    pub conservation: ConservationResult,
}

/// One running game.
#[derive(Debug)]
pub struct Game {
    state: EngineState,
    queues: BTreeMap<PlayerId, Vec<Action>>,
    codec: Codec,
    rng: StdRng,
    economy: EconomyConfig,
}

impl Game {
    /// A fresh game. `seed` fixes every random draw; `None` seeds from the OS.
    pub fn new(economy: EconomyConfig, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            state: EngineState::new(&economy),
            queues: BTreeMap::new(),
            codec: Codec::new(),
            rng,
            economy,
        }
    }

    /// A fresh game from the economy and world sections of `config`.
    ///
    /// Players are not added; see [`Game::add_player`].
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.economy.clone(), config.world.seed)
    }

    /// Seat a new player with the configured starting resources.
    ///
    /// Without a username a random UUID is used; a taken username gets a
    /// numeric suffix.
    pub fn add_player(&mut self, username: Option<&str>) -> PlayerId {
        self.state.roster.add(username, &self.economy)
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Submit an action by scalar id.
    pub fn submit_id(
        &mut self,
        player: &PlayerId,
        id: ActionId,
    ) -> Result<SubmitOutcome, SubmitError> {
        let raw = self.codec.decode(id);
        self.submit_raw(player, &raw)
    }

    /// Submit a raw action; parameters are resolved against live state.
    ///
    /// Unresolvable parameters queue `do_nothing` and set the player's
    /// `invalid_action` flag.
    pub fn submit_raw(
        &mut self,
        player: &PlayerId,
        raw: &RawAction,
    ) -> Result<SubmitOutcome, SubmitError> {
        let me = self
            .state
            .roster
            .get(player)
            .ok_or_else(|| SubmitError::UnknownPlayer(player.clone()))?;
        let ctx = ResolveContext {
            player: me,
            player_ids: self.state.roster.ids(),
            market: &self.state.boards.market,
        };
        let resolved = self.codec.resolve(raw, &ctx);
        Ok(self.enqueue(player, resolved))
    }

    /// Submit an already-structured action.
    pub fn submit_action(
        &mut self,
        player: &PlayerId,
        action: Action,
    ) -> Result<SubmitOutcome, SubmitError> {
        if !self.state.roster.contains(player) {
            return Err(SubmitError::UnknownPlayer(player.clone()));
        }
        Ok(self.enqueue(player, Some(action)))
    }

    fn enqueue(&mut self, player: &PlayerId, action: Option<Action>) -> SubmitOutcome {
        let queued = self.queued(player);
        if queued >= ACTIONS_PER_TURN {
            if let Some(p) = self.state.roster.get_mut(player) {
                p.invalid_action = true;
            }
            debug!(%player, "Submission rejected: turn already ended");
            return self.outcome(player, false, None);
        }

        let invalid = action.is_none();
        let action = action.unwrap_or(Action::DoNothing);
        let day = self.state.day();
        let requirement = self.state.food_requirement;
        let ends_turn = queued.saturating_add(1) >= ACTIONS_PER_TURN;

        let Some(p) = self.state.roster.get_mut(player) else {
            return self.outcome(player, false, None);
        };
        p.invalid_action = invalid;
        p.action_memory.push(action.kind().index());
        let upkeep = if ends_turn {
            Some(end_turn(p, requirement, day))
        } else {
            None
        };

        self.queues.entry(player.clone()).or_default().push(action);

        let mut turn = None;
        if let Some(upkeep) = upkeep {
            match upkeep {
                Ok(result) => {
                    if result.dead {
                        self.state.dead_players = self.state.dead_players.saturating_add(1);
                    }
                    if result.died {
                        info!(day, %player, "Player died");
                    }
                    if result.food_consumed > 0
                        && let Err(err) =
                            self.state
                                .ledger
                                .record_upkeep(day, result.food_consumed, player)
                    {
                        warn!(day, %player, %err, "Failed to record upkeep");
                    }
                }
                Err(err) => warn!(day, %player, %err, "End-of-turn upkeep failed"),
            }
            turn = self.try_advance();
        }

        self.outcome(player, true, turn)
    }

    fn outcome(
        &self,
        player: &PlayerId,
        accepted: bool,
        turn: Option<TurnSummary>,
    ) -> SubmitOutcome {
        SubmitOutcome {
            observation: self
                .observe(player)
                .unwrap_or_else(|| empty_observation(player)),
            accepted,
            turn,
        }
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    fn try_advance(&mut self) -> Option<TurnSummary> {
        let ready = self
            .state
            .roster
            .ids()
            .iter()
            .all(|id| self.queued(id) >= ACTIONS_PER_TURN);
        if ready { Some(self.resolve_turn()) } else { None }
    }

    fn resolve_turn(&mut self) -> TurnSummary {
        let day = self.state.day();
        let mark = self.state.ledger.len();
        let before = self.state.roster.totals();

        self.state.boards.reset_votes();
        let order = turn_order(&mut self.state.roster, &mut self.rng);
        let mut queues = std::mem::take(&mut self.queues);

        let mut executed: usize = 0;
        let mut rejected: usize = 0;
        for id in &order {
            let Some(actions) = queues.remove(id) else {
                continue;
            };
            for action in &actions {
                match self.execute(id, action) {
                    Some(true) => executed = executed.saturating_add(1),
                    Some(false) => rejected = rejected.saturating_add(1),
                    None => {}
                }
            }
        }

        let market = resolve_market(&mut self.state);
        let skill_auction = resolve_skill_auction(&mut self.state);
        let food_vote = resolve_food_votes(&mut self.state);

        let after = self.state.roster.totals();
        let conservation = self.state.ledger.reconcile_since(mark, day, &before, &after);

        self.maintenance();

        let players_alive = self
            .state
            .roster
            .len()
            .saturating_sub(self.state.roster.dead_count());
        info!(
            day,
            executed,
            rejected,
            sold = market.sold(),
            food_requirement = self.state.food_requirement,
            players_alive,
            "Turn resolved"
        );

        TurnSummary {
            day,
            order,
            executed,
            rejected,
            market,
            skill_auction,
            food_vote,
            food_requirement: self.state.food_requirement,
            players_alive,
            conservation,
        }
    }

    /// Run one queued action. `None` when the player is dead or missing.
    fn execute(&mut self, id: &PlayerId, action: &Action) -> Option<bool> {
        let day = self.state.day();
        let (player, player_ids) = self.state.roster.get_mut_with_ids(id)?;
        if !player.alive {
            return None;
        }
        let mut ctx = ExecutionContext {
            global_min_bid: self.state.global_min_bid,
            global_max_bid: self.state.global_max_bid,
            player_ids,
            boards: &mut self.state.boards,
        };

        match execute_action(player, action, &mut ctx) {
            Ok(result) => {
                self.apply_result(id, &result, day);
                Some(true)
            }
            Err(err) => {
                debug!(day, player = %id, kind = ?action.kind(), %err, "Action rejected");
                Some(false)
            }
        }
    }

    fn apply_result(&mut self, id: &PlayerId, result: &HandlerResult, day: u64) {
        let reason = match result.kind {
            ActionKind::EnergyToFood => "ENERGY_TO_FOOD",
            ActionKind::EnergyToCoins => "ENERGY_TO_COINS",
            _ => "ACTION",
        };
        for (&resource, &delta) in &result.resource_changes {
            let recorded = match (resource, delta.signum()) {
                (Resource::Energy, -1) => self.state.ledger.record_energy_spend(
                    day,
                    delta.saturating_neg(),
                    id,
                    reason,
                ),
                (Resource::Food | Resource::Coins, 1) => {
                    self.state.ledger.record_production(day, resource, delta, id)
                }
                _ => continue,
            };
            if let Err(err) = recorded {
                warn!(day, player = %id, ?resource, %err, "Failed to record transfer");
            }
        }

        if let Some(target) = &result.turn_vote
            && let Some(p) = self.state.roster.get_mut(target)
        {
            match p.turn_priority.with_vote() {
                Some(priority) => p.turn_priority = priority,
                None => warn!(day, player = %target, "Turn priority overflowed"),
            }
        }
    }

    fn maintenance(&mut self) {
        let day = self.state.day();
        match self.state.clock.draw_food_requirement(&mut self.rng) {
            Ok(requirement) => self.state.food_requirement = requirement,
            Err(err) => warn!(day, %err, "Food requirement draw failed"),
        }
        if let Err(err) = self.state.clock.advance() {
            warn!(day, %err, "Day counter did not advance");
        }
        for player in self.state.roster.iter_mut() {
            player.turn_ended = false;
        }
        self.queues.clear();
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// What `player` can currently see.
    pub fn observe(&self, player: &PlayerId) -> Option<Observation> {
        observe(&self.state, player)
    }

    /// Restore the default state: no players, day 1, empty boards and
    /// ledger. Idempotent.
    pub fn reset(&mut self) {
        self.state = EngineState::new(&self.economy);
        self.queues.clear();
        info!("Game reset");
    }

    /// Whether at most one player is alive.
    pub fn game_ended(&self) -> bool {
        self.state.game_ended()
    }

    /// Read access to the engine state.
    pub const fn state(&self) -> &EngineState {
        &self.state
    }

    /// The action codec.
    pub const fn codec(&self) -> &Codec {
        &self.codec
    }

    /// The current day.
    pub const fn day(&self) -> u64 {
        self.state.day()
    }

    /// Player ids in join order.
    pub fn players(&self) -> &[PlayerId] {
        self.state.roster.ids()
    }

    /// One player's state.
    pub fn player(&self, id: &PlayerId) -> Option<&PlayerState> {
        self.state.roster.get(id)
    }

    /// Mutable access to one player's state.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut PlayerState> {
        self.state.roster.get_mut(id)
    }

    /// Actions `player` has queued this turn.
    pub fn queued(&self, player: &PlayerId) -> usize {
        self.queues.get(player).map_or(0, Vec::len)
    }
}

fn empty_observation(player: &PlayerId) -> Observation {
    Observation {
        player: player.clone(),
        action_memory: Vec::new(),
        food: 0,
        energy: 0,
        coins: 0,
        skills: foodgame_types::SkillLevels::default(),
        alive: false,
        market: Vec::new(),
        food_requirement: 0,
        day: 0,
        global_min_bid: 0,
        global_max_bid: 0,
        other_scores: Vec::new(),
        other_alive: Vec::new(),
        score: 0,
        invalid_action: false,
    }
}
