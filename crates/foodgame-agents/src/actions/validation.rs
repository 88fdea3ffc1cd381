//! Action validation pipeline.
//!
//! The pipeline runs 4 stages in order:
//! 1. Amounts -- are quantities positive and bids non-negative?
//! 2. Resources -- does the player hold what the action spends?
//! 3. Market -- bid bounds, listing capacity, listing existence
//! 4. Targets -- does the referenced player exist?
//!
//! Each stage returns `Ok(())` on success or an [`ActionError`] on failure.
//! Validation never mutates anything.

use foodgame_types::{Action, PlayerId, PlayerState, Resource};

use crate::error::ActionError;
use crate::market::{FoodMarket, MAX_MARKET_LISTINGS};
use crate::skills;

/// Read-only game state needed to validate an action.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Global lower start-bid bound.
    pub global_min_bid: i64,
    /// Global upper start-bid bound.
    pub global_max_bid: i64,
    /// Open listings.
    pub market: &'a FoodMarket,
    /// Every player in the game.
    pub player_ids: &'a [PlayerId],
}

/// Validate an action through the full pipeline.
pub fn validate_action(
    action: &Action,
    player: &PlayerState,
    context: &ValidationContext<'_>,
) -> Result<(), ActionError> {
    // Stage 1: Amounts
    validate_amounts(action)?;

    // Stage 2: Resources
    validate_resources(action, player)?;

    // Stage 3: Market
    validate_market(action, player, context)?;

    // Stage 4: Targets
    validate_targets(action, context)?;

    Ok(())
}

/// Stage 1: conversions must be positive, listings and bids must not be
/// negative. An empty listing is allowed.
fn validate_amounts(action: &Action) -> Result<(), ActionError> {
    match *action {
        Action::EnergyToFood { amount } | Action::EnergyToCoins { amount } => {
            if amount <= 0 {
                return Err(ActionError::NonPositiveAmount { amount });
            }
        }
        Action::AddToMarket { amount, .. } => {
            if amount < 0 {
                return Err(ActionError::NegativeListing { amount });
            }
        }
        Action::AddBidForFood { bid, .. } | Action::AddBidForSkillAuction { bid } => {
            if bid < 0 {
                return Err(ActionError::NegativeBid { bid });
            }
        }
        Action::DoNothing
        | Action::AddVoteForSkillAuction { .. }
        | Action::AddVoteForTurn { .. }
        | Action::AddFoodVote { .. } => {}
    }
    Ok(())
}

/// Stage 2: the player must hold what the action spends or bids.
///
/// Converting to coins must leave at least one unit of energy; converting
/// to food may spend it all.
fn validate_resources(action: &Action, player: &PlayerState) -> Result<(), ActionError> {
    let (resource, requested, strict) = match *action {
        Action::EnergyToCoins { amount } => (Resource::Energy, amount, true),
        Action::EnergyToFood { amount } => (Resource::Energy, amount, false),
        Action::AddToMarket { amount, .. } => (Resource::Food, amount, false),
        Action::AddBidForFood { bid, .. } | Action::AddBidForSkillAuction { bid } => {
            (Resource::Coins, bid, false)
        }
        Action::DoNothing
        | Action::AddVoteForSkillAuction { .. }
        | Action::AddVoteForTurn { .. }
        | Action::AddFoodVote { .. } => return Ok(()),
    };

    let available = player.resource(resource);
    let enough = if strict {
        available > requested
    } else {
        available >= requested
    };
    if enough {
        Ok(())
    } else {
        Err(ActionError::InsufficientResource {
            resource,
            requested,
            available,
        })
    }
}

/// Stage 3: listing bounds and capacity, bid target existence.
fn validate_market(
    action: &Action,
    player: &PlayerState,
    context: &ValidationContext<'_>,
) -> Result<(), ActionError> {
    match action {
        Action::AddToMarket { start_bid, .. } => {
            let (min, max) = skills::start_bid_bounds(
                &player.skills,
                context.global_min_bid,
                context.global_max_bid,
            )?;
            if *start_bid < min || *start_bid > max {
                return Err(ActionError::StartBidOutOfRange {
                    start_bid: *start_bid,
                    min,
                    max,
                });
            }
            if context.market.is_full() {
                return Err(ActionError::MarketFull {
                    capacity: MAX_MARKET_LISTINGS,
                });
            }
            Ok(())
        }
        Action::AddBidForFood { market, .. } => {
            if context.market.contains(*market) {
                Ok(())
            } else {
                Err(ActionError::ListingNotFound(*market))
            }
        }
        _ => Ok(()),
    }
}

/// Stage 4: vote-for-turn targets must be players in this game.
fn validate_targets(action: &Action, context: &ValidationContext<'_>) -> Result<(), ActionError> {
    if let Action::AddVoteForTurn { target } = action
        && !context.player_ids.contains(target)
    {
        return Err(ActionError::PlayerNotFound(target.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use foodgame_types::{MarketId, Skill};

    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(PlayerId::named("p"), 10, 1, 5)
    }

    fn validate(action: &Action, player: &PlayerState, market: &FoodMarket) -> Result<(), ActionError> {
        let ids = [PlayerId::named("p"), PlayerId::named("q")];
        let ctx = ValidationContext {
            global_min_bid: 1,
            global_max_bid: 1,
            market,
            player_ids: &ids,
        };
        validate_action(action, player, &ctx)
    }

    #[test]
    fn do_nothing_always_passes() {
        assert!(validate(&Action::DoNothing, &player(), &FoodMarket::new()).is_ok());
    }

    #[test]
    fn energy_to_coins_needs_leftover_energy() {
        let p = player();
        let result = validate(&Action::EnergyToCoins { amount: 1 }, &p, &FoodMarket::new());
        assert_eq!(
            result,
            Err(ActionError::InsufficientResource {
                resource: Resource::Energy,
                requested: 1,
                available: 1,
            })
        );
    }

    #[test]
    fn energy_to_food_may_spend_everything() {
        let p = player();
        assert!(validate(&Action::EnergyToFood { amount: 1 }, &p, &FoodMarket::new()).is_ok());
        assert_eq!(
            validate(&Action::EnergyToFood { amount: 0 }, &p, &FoodMarket::new()),
            Err(ActionError::NonPositiveAmount { amount: 0 })
        );
    }

    #[test]
    fn listing_start_bid_must_be_in_bounds() {
        let p = player();
        let market = FoodMarket::new();
        assert!(validate(&Action::AddToMarket { amount: 3, start_bid: 1 }, &p, &market).is_ok());
        assert_eq!(
            validate(&Action::AddToMarket { amount: 3, start_bid: 2 }, &p, &market),
            Err(ActionError::StartBidOutOfRange {
                start_bid: 2,
                min: 1,
                max: 1,
            })
        );
    }

    #[test]
    fn empty_listing_is_allowed() {
        let p = player();
        let market = FoodMarket::new();
        assert!(validate(&Action::AddToMarket { amount: 0, start_bid: 1 }, &p, &market).is_ok());
        assert_eq!(
            validate(&Action::AddToMarket { amount: -1, start_bid: 1 }, &p, &market),
            Err(ActionError::NegativeListing { amount: -1 })
        );
    }

    #[test]
    fn listing_needs_enough_food() {
        let p = player();
        let result = validate(
            &Action::AddToMarket {
                amount: 11,
                start_bid: 1,
            },
            &p,
            &FoodMarket::new(),
        );
        assert!(matches!(
            result,
            Err(ActionError::InsufficientResource {
                resource: Resource::Food,
                ..
            })
        ));
    }

    #[test]
    fn food_bid_needs_open_listing_and_coins() {
        let p = player();
        let mut market = FoodMarket::new();
        let listed = market.list(PlayerId::named("q"), 2, 1).ok();
        let Some(id) = listed else {
            return;
        };
        let ok = Action::AddBidForFood {
            market: id,
            bid: 5,
            priority: 1,
        };
        let too_much = Action::AddBidForFood {
            market: id,
            bid: 6,
            priority: 1,
        };
        let missing = MarketId::new();
        let stale = Action::AddBidForFood {
            market: missing,
            bid: 1,
            priority: 1,
        };

        assert!(validate(&ok, &p, &market).is_ok());
        assert!(validate(&too_much, &p, &market).is_err());
        assert_eq!(
            validate(&stale, &p, &market),
            Err(ActionError::ListingNotFound(missing))
        );
    }

    #[test]
    fn negative_skill_bid_rejected() {
        let p = player();
        assert_eq!(
            validate(&Action::AddBidForSkillAuction { bid: -1 }, &p, &FoodMarket::new()),
            Err(ActionError::NegativeBid { bid: -1 })
        );
    }

    #[test]
    fn vote_targets_must_exist() {
        let p = player();
        let market = FoodMarket::new();
        let known = Action::AddVoteForTurn {
            target: PlayerId::named("q"),
        };
        let unknown = Action::AddVoteForTurn {
            target: PlayerId::named("z"),
        };
        assert!(validate(&known, &p, &market).is_ok());
        assert!(validate(&unknown, &p, &market).is_err());
        assert!(
            validate(
                &Action::AddVoteForSkillAuction {
                    skill: Skill::Auction
                },
                &p,
                &market
            )
            .is_ok()
        );
    }
}
