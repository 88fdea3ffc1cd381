//! Scalar action ids to structured actions and back.
//!
//! External policies control a player through a single integer. The
//! [`Codec`] maps that integer onto the ordered action registry:
//!
//! | idx | kind | parameters |
//! |---|---|---|
//! | 0 | `do_nothing` | raw (1) |
//! | 1 | `energy_to_food` | % of energy (100) |
//! | 2 | `add_vote_for_skill_auction` | skill (6) |
//! | 3 | `add_bid_for_skill_auction` | % of coins (100) |
//! | 4 | `energy_to_coins` | % of energy (100) |
//! | 5 | `add_vote_for_turn` | player (10) |
//! | 6 | `add_food_vote` | vote category (4) |
//! | 7 | `add_to_market` | % of coins (100), raw start bid (100) |
//! | 8 | `add_bid_for_food` | listing (100), % of coins (100), raw priority (100) |
//!
//! Each kind owns a contiguous span of ids whose width is the product of its
//! parameter cardinalities. Ids are one-based; id 0 aliases id 1. Within a
//! span the offset is unranked mixed-radix, first parameter varying fastest,
//! and every parameter value is one-based.
//!
//! Decoding yields a [`RawAction`]; [`Codec::resolve`] turns it into an
//! [`Action`] against live game state. Selections that point past the live
//! range resolve to `None`, which the orchestrator treats as an invalid
//! submission.

use foodgame_agents::FoodMarket;
use foodgame_types::{
    Action, ActionId, ActionKind, FoodVote, MarketId, PlayerId, PlayerState, RawAction, Resource,
    Skill,
};

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// How a one-based parameter value becomes a domain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Used as is.
    Raw,
    /// `ceil(value / 100 * holding)` of the submitting player's resource.
    Percent(Resource),
    /// Position in the roster.
    Player,
    /// Position in the food market.
    Listing,
    /// Position in the skill registry.
    Skill,
    /// Position in the food-vote registry.
    FoodVote,
}

/// One parameter slot of an action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Resolution rule.
    pub kind: ParamKind,
    /// Number of distinct values (values range over `1..=cardinality`).
    pub cardinality: u32,
}

impl ParamSpec {
    const fn new(kind: ParamKind, cardinality: u32) -> Self {
        Self { kind, cardinality }
    }
}

/// An action kind and its parameter slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    /// The action kind.
    pub kind: ActionKind,
    /// Parameter slots, least significant first.
    pub params: &'static [ParamSpec],
}

impl ActionSpec {
    /// Number of ids this kind occupies.
    pub fn span(&self) -> i64 {
        self.params
            .iter()
            .map(|p| i64::from(p.cardinality))
            .fold(1, i64::saturating_mul)
    }

    fn unrank(&self, mut offset: i64) -> Vec<u32> {
        let mut values = Vec::with_capacity(self.params.len());
        for param in self.params {
            let radix = i64::from(param.cardinality.max(1));
            let digit = offset.checked_rem(radix).unwrap_or(0);
            offset = offset.checked_div(radix).unwrap_or(0);
            let value = u32::try_from(digit).map_or(1, |d| d.saturating_add(1));
            values.push(value);
        }
        values
    }

    fn rank(&self, values: &[u32]) -> Option<i64> {
        if values.len() != self.params.len() {
            return None;
        }
        let mut offset: i64 = 0;
        let mut weight: i64 = 1;
        for (param, &value) in self.params.iter().zip(values) {
            if value == 0 || value > param.cardinality {
                return None;
            }
            let digit = i64::from(value.checked_sub(1)?);
            offset = offset.checked_add(digit.checked_mul(weight)?)?;
            weight = weight.checked_mul(i64::from(param.cardinality))?;
        }
        Some(offset)
    }
}

const PERCENT: u32 = 100;

/// The ordered action registry. Indices are stable.
pub static REGISTRY: [ActionSpec; 9] = [
    ActionSpec {
        kind: ActionKind::DoNothing,
        params: &[ParamSpec::new(ParamKind::Raw, 1)],
    },
    ActionSpec {
        kind: ActionKind::EnergyToFood,
        params: &[ParamSpec::new(ParamKind::Percent(Resource::Energy), PERCENT)],
    },
    ActionSpec {
        kind: ActionKind::AddVoteForSkillAuction,
        params: &[ParamSpec::new(ParamKind::Skill, 6)],
    },
    ActionSpec {
        kind: ActionKind::AddBidForSkillAuction,
        params: &[ParamSpec::new(ParamKind::Percent(Resource::Coins), PERCENT)],
    },
    ActionSpec {
        kind: ActionKind::EnergyToCoins,
        params: &[ParamSpec::new(ParamKind::Percent(Resource::Energy), PERCENT)],
    },
    ActionSpec {
        kind: ActionKind::AddVoteForTurn,
        params: &[ParamSpec::new(ParamKind::Player, 10)],
    },
    ActionSpec {
        kind: ActionKind::AddFoodVote,
        params: &[ParamSpec::new(ParamKind::FoodVote, 4)],
    },
    ActionSpec {
        kind: ActionKind::AddToMarket,
        params: &[
            ParamSpec::new(ParamKind::Percent(Resource::Coins), PERCENT),
            ParamSpec::new(ParamKind::Raw, 100),
        ],
    },
    ActionSpec {
        kind: ActionKind::AddBidForFood,
        params: &[
            ParamSpec::new(ParamKind::Listing, 100),
            ParamSpec::new(ParamKind::Percent(Resource::Coins), PERCENT),
            ParamSpec::new(ParamKind::Raw, 100),
        ],
    },
];

// ---------------------------------------------------------------------------
// Resolution context
// ---------------------------------------------------------------------------

/// Live state a raw action is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// The submitting player.
    pub player: &'a PlayerState,
    /// Every player, in roster order.
    pub player_ids: &'a [PlayerId],
    /// Open listings, in market order.
    pub market: &'a FoodMarket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolved {
    Int(i64),
    Player(PlayerId),
    Listing(MarketId),
    Skill(Skill),
    Vote(FoodVote),
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Bijection between scalar ids and raw actions over [`REGISTRY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec;

impl Codec {
    /// The standard codec.
    pub const fn new() -> Self {
        Self
    }

    /// All action specs in registry order.
    pub const fn specs(&self) -> &'static [ActionSpec] {
        &REGISTRY
    }

    /// The spec of one kind.
    pub fn spec(&self, kind: ActionKind) -> Option<&'static ActionSpec> {
        REGISTRY.get(usize::from(kind.index()))
    }

    /// The largest valid id: the sum of every kind's span.
    pub fn boundary(&self) -> ActionId {
        REGISTRY
            .iter()
            .map(ActionSpec::span)
            .fold(0, i64::saturating_add)
    }

    /// Decode a scalar id into a raw action.
    ///
    /// The id is clamped into `[1, boundary]` first, so every input decodes.
    pub fn decode(&self, id: ActionId) -> RawAction {
        let mut remaining = id.clamp(1, self.boundary());
        for spec in &REGISTRY {
            let span = spec.span();
            if remaining <= span {
                let offset = remaining.saturating_sub(1);
                return RawAction::new(spec.kind, spec.unrank(offset));
            }
            remaining = remaining.saturating_sub(span);
        }
        RawAction::do_nothing()
    }

    /// Encode a raw action into its scalar id.
    ///
    /// Returns `None` when the parameter count or any value is outside the
    /// registry's ranges.
    pub fn encode(&self, raw: &RawAction) -> Option<ActionId> {
        let position = usize::from(raw.kind.index());
        let start = REGISTRY
            .iter()
            .take(position)
            .map(ActionSpec::span)
            .try_fold(0_i64, i64::checked_add)?;
        let offset = self.spec(raw.kind)?.rank(&raw.params)?;
        start.checked_add(offset)?.checked_add(1)
    }

    /// Resolve a raw action against live state.
    ///
    /// Returns `None` if any parameter is out of range for its slot or
    /// selects a player, listing, skill, or vote that does not exist.
    pub fn resolve(&self, raw: &RawAction, ctx: &ResolveContext<'_>) -> Option<Action> {
        if raw.kind == ActionKind::DoNothing {
            return Some(Action::DoNothing);
        }
        let spec = self.spec(raw.kind)?;
        if raw.params.len() != spec.params.len() {
            return None;
        }

        let values = spec
            .params
            .iter()
            .zip(&raw.params)
            .map(|(param, &value)| resolve_param(*param, value, ctx))
            .collect::<Option<Vec<_>>>()?;

        build_action(raw.kind, &values)
    }

    /// Decode and resolve in one step.
    pub fn decode_and_resolve(&self, id: ActionId, ctx: &ResolveContext<'_>) -> Option<Action> {
        self.resolve(&self.decode(id), ctx)
    }
}

fn resolve_param(param: ParamSpec, value: u32, ctx: &ResolveContext<'_>) -> Option<Resolved> {
    if value == 0 || value > param.cardinality {
        return None;
    }
    let position = usize::try_from(value.checked_sub(1)?).ok()?;

    match param.kind {
        ParamKind::Raw => Some(Resolved::Int(i64::from(value))),
        ParamKind::Percent(resource) => {
            percent_of(value, ctx.player.resource(resource)).map(Resolved::Int)
        }
        ParamKind::Player => ctx.player_ids.get(position).cloned().map(Resolved::Player),
        ParamKind::Listing => ctx.market.at(position).map(|l| Resolved::Listing(l.id)),
        ParamKind::Skill => Skill::from_index(position).map(Resolved::Skill),
        ParamKind::FoodVote => FoodVote::from_index(position).map(Resolved::Vote),
    }
}

/// `ceil(percent / 100 * holding)` in exact integer arithmetic.
///
/// Negative results (a player in food debt) are invalid.
fn percent_of(percent: u32, holding: i64) -> Option<i64> {
    let scaled = i64::from(percent).checked_mul(holding)?;
    let whole = scaled.checked_div_euclid(100)?;
    let rounded = if scaled.checked_rem_euclid(100)? == 0 {
        whole
    } else {
        whole.checked_add(1)?
    };
    (rounded >= 0).then_some(rounded)
}

fn build_action(kind: ActionKind, values: &[Resolved]) -> Option<Action> {
    let action = match (kind, values) {
        (ActionKind::DoNothing, _) => Action::DoNothing,
        (ActionKind::EnergyToFood, [Resolved::Int(amount)]) => {
            Action::EnergyToFood { amount: *amount }
        }
        (ActionKind::EnergyToCoins, [Resolved::Int(amount)]) => {
            Action::EnergyToCoins { amount: *amount }
        }
        (ActionKind::AddVoteForSkillAuction, [Resolved::Skill(skill)]) => {
            Action::AddVoteForSkillAuction { skill: *skill }
        }
        (ActionKind::AddBidForSkillAuction, [Resolved::Int(bid)]) => {
            Action::AddBidForSkillAuction { bid: *bid }
        }
        (ActionKind::AddVoteForTurn, [Resolved::Player(target)]) => Action::AddVoteForTurn {
            target: target.clone(),
        },
        (ActionKind::AddFoodVote, [Resolved::Vote(vote)]) => Action::AddFoodVote { vote: *vote },
        (ActionKind::AddToMarket, [Resolved::Int(amount), Resolved::Int(start_bid)]) => {
            Action::AddToMarket {
                amount: *amount,
                start_bid: *start_bid,
            }
        }
        (
            ActionKind::AddBidForFood,
            [
                Resolved::Listing(market),
                Resolved::Int(bid),
                Resolved::Int(priority),
            ],
        ) => Action::AddBidForFood {
            market: *market,
            bid: *bid,
            priority: *priority,
        },
        _ => return None,
    };
    Some(action)
}
