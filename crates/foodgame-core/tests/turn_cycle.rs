//! Integration tests for the full turn cycle of `foodgame-core`.
//!
//! Each test drives a [`Game`] only through its public submission API and
//! checks the invariants that must hold across whole turns: queue gating,
//! action memory width, market settlement, vote resolution, reset, and
//! conservation of resources against the ledger.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use foodgame_agents::EconomyConfig;
use foodgame_core::decision::{NothingDecisionSource, RandomDecisionSource};
use foodgame_core::runner::{self, EndReason, NoOpCallback};
use foodgame_core::{ACTIONS_PER_TURN, Game, TurnSummary};
use foodgame_types::{
    Action, ActionKind, ActionMemory, FIXED_OBSERVATION_WIDTH, FoodVote, PlayerId, RawAction,
    Skill,
};

fn game_with(economy: EconomyConfig, names: &[&str]) -> Game {
    let mut game = Game::new(economy, Some(42));
    for name in names {
        game.add_player(Some(*name));
    }
    game
}

fn pid(name: &str) -> PlayerId {
    PlayerId::named(name)
}

/// Queue `first` followed by do-nothing until the player's turn ends.
fn submit_turn(game: &mut Game, name: &str, first: Action) -> Option<TurnSummary> {
    let mut summary = None;
    for i in 0..ACTIONS_PER_TURN {
        let action = if i == 0 {
            first.clone()
        } else {
            Action::DoNothing
        };
        let outcome = game.submit_action(&pid(name), action).unwrap();
        assert!(outcome.accepted);
        if outcome.turn.is_some() {
            summary = outcome.turn;
        }
    }
    summary
}

#[test]
fn turn_advances_only_after_every_player_is_done() {
    let mut game = game_with(EconomyConfig::default(), &["a", "b", "c"]);

    assert!(submit_turn(&mut game, "a", Action::DoNothing).is_none());
    assert!(submit_turn(&mut game, "b", Action::DoNothing).is_none());
    assert_eq!(game.day(), 1);

    let summary = submit_turn(&mut game, "c", Action::DoNothing).unwrap();
    assert_eq!(summary.day, 1);
    assert_eq!(summary.order.len(), 3);
    assert_eq!(game.day(), 2);
    assert_eq!(game.queued(&pid("a")), 0);
}

#[test]
fn first_turn_draws_requirement_of_one() {
    let mut game = game_with(EconomyConfig::default(), &["a", "b"]);
    submit_turn(&mut game, "a", Action::DoNothing);
    let summary = submit_turn(&mut game, "b", Action::DoNothing).unwrap();
    assert_eq!(summary.food_requirement, 1);
    assert_eq!(game.state().food_requirement, 1);
}

#[test]
fn listing_size_is_a_share_of_coins() {
    let mut game = game_with(EconomyConfig::default(), &["broke", "other"]);

    // no coins, so even a full share lists nothing
    let outcome = game
        .submit_raw(&pid("broke"), &RawAction::new(ActionKind::AddToMarket, vec![100, 1]))
        .unwrap();
    assert!(outcome.accepted);
    assert!(!outcome.observation.invalid_action);
    for _ in 1..ACTIONS_PER_TURN {
        game.submit_action(&pid("broke"), Action::DoNothing).unwrap();
    }
    submit_turn(&mut game, "other", Action::DoNothing).unwrap();

    let listing = game.state().boards.market.at(0).unwrap();
    assert_eq!(listing.seller, pid("broke"));
    assert_eq!(listing.amount, 0);
    // the first day carries no food requirement
    assert_eq!(game.player(&pid("broke")).unwrap().food, 10);
}

#[test]
fn listing_sells_to_the_qualifying_bidder() {
    let economy = EconomyConfig {
        starting_coins: 10,
        global_max_bid: 10,
        ..EconomyConfig::default()
    };
    let mut game = game_with(economy, &["seller", "buyer"]);

    submit_turn(
        &mut game,
        "seller",
        Action::AddToMarket {
            amount: 5,
            start_bid: 5,
        },
    );
    submit_turn(&mut game, "buyer", Action::DoNothing);

    let listing = game.state().boards.market.at(0).unwrap().id;

    submit_turn(&mut game, "seller", Action::DoNothing);
    let summary = submit_turn(
        &mut game,
        "buyer",
        Action::AddBidForFood {
            market: listing,
            bid: 6,
            priority: 1,
        },
    )
    .unwrap();

    assert_eq!(summary.market.sold(), 1);
    assert!(summary.conservation.is_balanced());
    assert!(game.state().boards.market.is_empty());

    // both paid one food of upkeep on day 2
    let seller = game.player(&pid("seller")).unwrap();
    assert_eq!((seller.food, seller.coins), (4, 16));
    let buyer = game.player(&pid("buyer")).unwrap();
    assert_eq!((buyer.food, buyer.coins), (14, 4));
}

#[test]
fn tied_food_votes_leave_bounds_unchanged() {
    let names = ["a", "b", "c", "d"];
    let mut game = game_with(EconomyConfig::default(), &names);

    let mut summary = None;
    for (name, vote) in names.iter().zip(FoodVote::ALL) {
        summary = submit_turn(&mut game, name, Action::AddFoodVote { vote });
    }

    assert_eq!(summary.unwrap().food_vote, None);
    assert_eq!(game.state().global_min_bid, 1);
    assert_eq!(game.state().global_max_bid, 1);
}

#[test]
fn winning_food_vote_moves_a_bound() {
    let mut game = game_with(EconomyConfig::default(), &["a", "b"]);
    submit_turn(
        &mut game,
        "a",
        Action::AddFoodVote {
            vote: FoodVote::IncreaseMinBid,
        },
    );
    let summary = submit_turn(&mut game, "b", Action::DoNothing).unwrap();
    assert_eq!(summary.food_vote, Some(FoodVote::IncreaseMinBid));
    assert_eq!(game.state().global_min_bid, 2);
}

#[test]
fn skill_auction_winner_levels_up() {
    let economy = EconomyConfig {
        starting_coins: 4,
        ..EconomyConfig::default()
    };
    let mut game = game_with(economy, &["a", "b"]);
    submit_turn(&mut game, "a", Action::AddBidForSkillAuction { bid: 3 });
    let summary = submit_turn(&mut game, "b", Action::DoNothing).unwrap();

    let win = summary.skill_auction.winner.unwrap();
    assert_eq!(win.player, pid("a"));
    assert_eq!(summary.skill_auction.skill, Skill::FoodConversion);
    let a = game.player(&pid("a")).unwrap();
    assert_eq!(a.skills.food_conversion, 2);
    assert_eq!(a.coins, 1);
    assert!(summary.conservation.is_balanced());
}

#[test]
fn random_play_keeps_invariants() {
    let names = ["a", "b", "c", "d", "e"];
    let mut game = game_with(EconomyConfig::default(), &names);
    let mut source = RandomDecisionSource::seeded(7);

    for _ in 0..30 {
        if game.game_ended() {
            break;
        }
        let summary = runner::play_turn(&mut game, &mut source).unwrap().unwrap();

        assert!(summary.conservation.is_balanced(), "{summary:?}");
        let mut order = summary.order.clone();
        order.sort();
        let mut roster = game.players().to_vec();
        roster.sort();
        assert_eq!(order, roster);

        for id in game.players() {
            let player = game.player(id).unwrap();
            assert_eq!(player.action_memory.len(), ActionMemory::CAPACITY);
            assert!(!player.turn_ended);
            let obs = game.observe(id).unwrap();
            assert_eq!(
                obs.to_vector().len(),
                FIXED_OBSERVATION_WIDTH + 2 * (names.len() - 1)
            );
        }
        assert_eq!(
            game.game_ended(),
            game.state().dead_players >= names.len() - 1
        );
    }
}

#[test]
fn identical_seeds_give_identical_games() {
    let play = || {
        let mut game = game_with(EconomyConfig::default(), &["a", "b", "c"]);
        let mut source = RandomDecisionSource::seeded(99);
        for _ in 0..10 {
            runner::play_turn(&mut game, &mut source).unwrap();
        }
        game.state()
            .roster
            .iter()
            .map(|p| (p.food, p.energy, p.coins, p.score, p.skills))
            .collect::<Vec<_>>()
    };
    assert_eq!(play(), play());
}

#[test]
fn reset_is_idempotent_and_restores_defaults() {
    let mut game = game_with(EconomyConfig::default(), &["a", "b"]);
    let mut source = RandomDecisionSource::seeded(1);
    runner::play_turn(&mut game, &mut source).unwrap();

    game.reset();
    game.reset();

    let state = game.state();
    assert_eq!(game.day(), 1);
    assert_eq!(state.food_requirement, 0);
    assert!(state.roster.is_empty());
    assert!(state.boards.market.is_empty());
    assert!(state.boards.food_bids.is_empty());
    assert!(state.boards.skill_bids.is_empty());
    assert!(state.boards.food_votes.counts().iter().all(|&c| c == 0));
    assert!(state.boards.skill_votes.counts().iter().all(|&c| c == 0));
    assert_eq!(state.skill_auction, Skill::FoodConversion);
    assert_eq!(state.dead_players, 0);
}

#[test]
fn observation_record_serializes() {
    let mut game = game_with(EconomyConfig::default(), &["a", "b"]);
    let obs = game.observe(&pid("a")).unwrap();
    let json = serde_json::to_value(obs.to_record()).unwrap();
    assert_eq!(json["food"], 10);
    assert_eq!(json["food_market"].as_array().unwrap().len(), 200);
    assert_eq!(json["action_memory"].as_array().unwrap().len(), 20);

    game.reset();
    assert!(game.observe(&pid("a")).is_none());
}

#[test]
fn run_game_stops_at_day_limit() {
    let mut game = game_with(EconomyConfig::default(), &["a", "b", "c"]);
    let result = runner::run_game(
        &mut game,
        &mut NothingDecisionSource::new(),
        4,
        &mut NoOpCallback,
    )
    .unwrap();
    assert_eq!(result.end_reason, EndReason::MaxDaysReached);
    assert_eq!(result.turns, 4);
    assert_eq!(game.day(), 5);
}
