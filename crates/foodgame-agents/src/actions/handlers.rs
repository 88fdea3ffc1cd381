//! Execution handlers for player actions.
//!
//! [`execute_action`] runs the validation pipeline and then the matching
//! handler. Each handler assumes validation passed and applies the side
//! effects: player resources, board entries, and a [`HandlerResult`]
//! describing what changed so the caller can record ledger entries and
//! apply cross-player effects (turn votes).

use std::collections::BTreeMap;

use foodgame_types::{
    Action, ActionKind, FoodVote, MarketId, PlayerId, PlayerState, Resource, Skill,
};

use crate::boards::Boards;
use crate::error::ActionError;
use crate::skills;

use super::validation::{ValidationContext, validate_action};

/// Game state a handler may read or write.
///
/// The caller assembles this from the engine state for each action.
#[derive(Debug)]
pub struct ExecutionContext<'a> {
    /// Global lower start-bid bound.
    pub global_min_bid: i64,
    /// Global upper start-bid bound.
    pub global_max_bid: i64,
    /// Every player in the game (vote targets).
    pub player_ids: &'a [PlayerId],
    /// Listings, bids, and vote tallies.
    pub boards: &'a mut Boards,
}

impl ExecutionContext<'_> {
    fn validation(&self) -> ValidationContext<'_> {
        ValidationContext {
            global_min_bid: self.global_min_bid,
            global_max_bid: self.global_max_bid,
            market: &self.boards.market,
            player_ids: self.player_ids,
        }
    }
}

/// Result of executing an action handler, containing the changes to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResult {
    /// The kind of action executed.
    pub kind: ActionKind,
    /// Signed change to the acting player's holdings.
    pub resource_changes: BTreeMap<Resource, i64>,
    /// Listing opened by an `add_to_market` action.
    pub listing_created: Option<MarketId>,
    /// Player whose turn priority the caller must raise.
    pub turn_vote: Option<PlayerId>,
}

impl HandlerResult {
    const fn empty(kind: ActionKind) -> Self {
        Self {
            kind,
            resource_changes: BTreeMap::new(),
            listing_created: None,
            turn_vote: None,
        }
    }
}

/// Validate and execute one action for `player`.
///
/// On error nothing has been mutated.
pub fn execute_action(
    player: &mut PlayerState,
    action: &Action,
    ctx: &mut ExecutionContext<'_>,
) -> Result<HandlerResult, ActionError> {
    validate_action(action, player, &ctx.validation())?;

    match action {
        Action::DoNothing => Ok(HandlerResult::empty(ActionKind::DoNothing)),
        Action::EnergyToFood { amount } => execute_energy_to_food(player, *amount),
        Action::EnergyToCoins { amount } => execute_energy_to_coins(player, *amount),
        Action::AddToMarket { amount, start_bid } => {
            execute_add_to_market(player, *amount, *start_bid, ctx.boards)
        }
        Action::AddBidForFood {
            market,
            bid,
            priority,
        } => Ok(execute_add_bid_for_food(
            player, *market, *bid, *priority, ctx.boards,
        )),
        Action::AddBidForSkillAuction { bid } => {
            Ok(execute_add_bid_for_skill_auction(player, *bid, ctx.boards))
        }
        Action::AddVoteForSkillAuction { skill } => {
            Ok(execute_add_vote_for_skill_auction(*skill, ctx.boards))
        }
        Action::AddFoodVote { vote } => Ok(execute_add_food_vote(*vote, ctx.boards)),
        Action::AddVoteForTurn { target } => Ok(execute_add_vote_for_turn(target)),
    }
}

/// Execute an energy-to-food conversion.
///
/// Modifies:
/// - Player energy (decreased by `amount`)
/// - Player food (increased by `(2 * amount - 1) * food_conversion_skill`)
pub fn execute_energy_to_food(
    player: &mut PlayerState,
    amount: i64,
) -> Result<HandlerResult, ActionError> {
    convert_energy(
        player,
        amount,
        Resource::Food,
        Skill::FoodConversion,
        ActionKind::EnergyToFood,
    )
}

/// Execute an energy-to-coins conversion.
///
/// Modifies:
/// - Player energy (decreased by `amount`)
/// - Player coins (increased by `(2 * amount - 1) * money_conversion_skill`)
pub fn execute_energy_to_coins(
    player: &mut PlayerState,
    amount: i64,
) -> Result<HandlerResult, ActionError> {
    convert_energy(
        player,
        amount,
        Resource::Coins,
        Skill::MoneyConversion,
        ActionKind::EnergyToCoins,
    )
}

fn convert_energy(
    player: &mut PlayerState,
    amount: i64,
    output: Resource,
    skill: Skill,
    kind: ActionKind,
) -> Result<HandlerResult, ActionError> {
    let produced = skills::conversion_yield(amount, player.skills.get(skill))?;
    let energy = player
        .energy
        .checked_sub(amount)
        .ok_or_else(|| ActionError::overflow("energy spend"))?;
    let target = match output {
        Resource::Coins => &mut player.coins,
        Resource::Food | Resource::Energy => &mut player.food,
    };
    *target = target
        .checked_add(produced)
        .ok_or_else(|| ActionError::overflow("conversion output"))?;
    player.energy = energy;

    let mut result = HandlerResult::empty(kind);
    result.resource_changes.insert(Resource::Energy, amount.saturating_neg());
    result.resource_changes.insert(output, produced);
    Ok(result)
}

/// Execute an `add_to_market` action: open a listing.
///
/// The listed food stays with the seller until the listing sells.
pub fn execute_add_to_market(
    player: &PlayerState,
    amount: i64,
    start_bid: i64,
    boards: &mut Boards,
) -> Result<HandlerResult, ActionError> {
    let id = boards.market.list(player.id.clone(), amount, start_bid)?;
    let mut result = HandlerResult::empty(ActionKind::AddToMarket);
    result.listing_created = Some(id);
    Ok(result)
}

/// Execute an `add_bid_for_food` action: record or overwrite a bid.
pub fn execute_add_bid_for_food(
    player: &PlayerState,
    market: MarketId,
    bid: i64,
    priority: i64,
    boards: &mut Boards,
) -> HandlerResult {
    boards
        .food_bids
        .place(priority, market, player.id.clone(), bid);
    HandlerResult::empty(ActionKind::AddBidForFood)
}

/// Execute an `add_bid_for_skill_auction` action.
pub fn execute_add_bid_for_skill_auction(
    player: &PlayerState,
    bid: i64,
    boards: &mut Boards,
) -> HandlerResult {
    boards.skill_bids.place(player.id.clone(), bid);
    HandlerResult::empty(ActionKind::AddBidForSkillAuction)
}

/// Execute an `add_vote_for_skill_auction` action.
pub fn execute_add_vote_for_skill_auction(skill: Skill, boards: &mut Boards) -> HandlerResult {
    boards.skill_votes.add(skill);
    HandlerResult::empty(ActionKind::AddVoteForSkillAuction)
}

/// Execute an `add_food_vote` action.
pub fn execute_add_food_vote(vote: FoodVote, boards: &mut Boards) -> HandlerResult {
    boards.food_votes.add(vote);
    HandlerResult::empty(ActionKind::AddFoodVote)
}

/// Execute an `add_vote_for_turn` action.
///
/// The target may be the acting player itself, so the priority increase is
/// returned for the caller to apply.
pub fn execute_add_vote_for_turn(target: &PlayerId) -> HandlerResult {
    let mut result = HandlerResult::empty(ActionKind::AddVoteForTurn);
    result.turn_vote = Some(target.clone());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PlayerState, Vec<PlayerId>, Boards) {
        let player = PlayerState::new(PlayerId::named("p"), 10, 3, 5);
        let ids = vec![PlayerId::named("p"), PlayerId::named("q")];
        (player, ids, Boards::new())
    }

    fn run(
        player: &mut PlayerState,
        ids: &[PlayerId],
        boards: &mut Boards,
        action: &Action,
    ) -> Result<HandlerResult, ActionError> {
        let mut ctx = ExecutionContext {
            global_min_bid: 1,
            global_max_bid: 2,
            player_ids: ids,
            boards,
        };
        execute_action(player, action, &mut ctx)
    }

    #[test]
    fn energy_to_food_applies_formula() {
        let (mut p, ids, mut boards) = setup();
        p.skills.food_conversion = 2;
        let result = run(&mut p, &ids, &mut boards, &Action::EnergyToFood { amount: 2 });

        assert!(result.is_ok());
        assert_eq!(p.energy, 1);
        assert_eq!(p.food, 10 + 3 * 2);
        if let Ok(r) = result {
            assert_eq!(r.resource_changes.get(&Resource::Food), Some(&6));
            assert_eq!(r.resource_changes.get(&Resource::Energy), Some(&-2));
        }
    }

    #[test]
    fn energy_to_coins_applies_formula() {
        let (mut p, ids, mut boards) = setup();
        let result = run(&mut p, &ids, &mut boards, &Action::EnergyToCoins { amount: 2 });
        assert!(result.is_ok());
        assert_eq!(p.energy, 1);
        assert_eq!(p.coins, 5 + 3);
    }

    #[test]
    fn rejected_action_mutates_nothing() {
        let (mut p, ids, mut boards) = setup();
        let before = p.clone();
        let result = run(&mut p, &ids, &mut boards, &Action::EnergyToCoins { amount: 3 });
        assert!(result.is_err());
        assert_eq!(p, before);
    }

    #[test]
    fn add_to_market_keeps_food_with_seller() {
        let (mut p, ids, mut boards) = setup();
        let result = run(
            &mut p,
            &ids,
            &mut boards,
            &Action::AddToMarket {
                amount: 4,
                start_bid: 2,
            },
        );
        let listing = result.ok().and_then(|r| r.listing_created);
        assert!(listing.is_some());
        assert_eq!(p.food, 10);
        assert_eq!(boards.market.len(), 1);
    }

    #[test]
    fn bids_and_votes_land_on_boards() {
        let (mut p, ids, mut boards) = setup();
        let Ok(listing) = boards.market.list(PlayerId::named("q"), 2, 1) else {
            return;
        };
        let actions = [
            Action::AddBidForFood {
                market: listing,
                bid: 3,
                priority: 4,
            },
            Action::AddBidForSkillAuction { bid: 2 },
            Action::AddVoteForSkillAuction {
                skill: Skill::Auction,
            },
            Action::AddFoodVote {
                vote: FoodVote::IncreaseMaxBid,
            },
        ];
        for action in &actions {
            assert!(run(&mut p, &ids, &mut boards, action).is_ok());
        }

        assert_eq!(boards.food_bids.bid_of(4, listing, &p.id), Some(3));
        assert_eq!(boards.skill_bids.bid_of(&p.id), Some(2));
        assert_eq!(boards.skill_votes.get(Skill::Auction), 1);
        assert_eq!(boards.food_votes.get(FoodVote::IncreaseMaxBid), 1);
        assert_eq!(p.coins, 5);
    }

    #[test]
    fn vote_for_turn_is_returned_to_caller() {
        let (mut p, ids, mut boards) = setup();
        let target = PlayerId::named("q");
        let result = run(
            &mut p,
            &ids,
            &mut boards,
            &Action::AddVoteForTurn {
                target: target.clone(),
            },
        );
        assert_eq!(result.ok().and_then(|r| r.turn_vote), Some(target));
    }
}
