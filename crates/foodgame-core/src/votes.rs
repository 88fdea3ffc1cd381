//! Food vote resolution: moves the global start-bid bounds.

use foodgame_types::FoodVote;
use tracing::debug;

use crate::state::EngineState;

/// Apply the unique winning food vote, if any.
///
/// A tie at the top leaves both bounds unchanged. Bounds never drop below
/// zero. Returns the applied vote.
pub fn resolve_food_votes(state: &mut EngineState) -> Option<FoodVote> {
    let vote = state.boards.food_votes.unique_leader()?;
    match vote {
        FoodVote::IncreaseMinBid => {
            state.global_min_bid = state.global_min_bid.saturating_add(1);
        }
        FoodVote::DecreaseMinBid => {
            state.global_min_bid = state.global_min_bid.saturating_sub(1).max(0);
        }
        FoodVote::IncreaseMaxBid => {
            state.global_max_bid = state.global_max_bid.saturating_add(1);
        }
        FoodVote::DecreaseMaxBid => {
            state.global_max_bid = state.global_max_bid.saturating_sub(1).max(0);
        }
    }
    debug!(
        day = state.day(),
        ?vote,
        global_min_bid = state.global_min_bid,
        global_max_bid = state.global_max_bid,
        "Food vote applied"
    );
    Some(vote)
}

#[cfg(test)]
mod tests {
    use foodgame_agents::EconomyConfig;

    use super::*;

    fn state() -> EngineState {
        EngineState::new(&EconomyConfig::default())
    }

    #[test]
    fn unique_leader_moves_bound() {
        let mut state = state();
        state.boards.food_votes.add(FoodVote::IncreaseMaxBid);
        state.boards.food_votes.add(FoodVote::IncreaseMaxBid);
        state.boards.food_votes.add(FoodVote::DecreaseMinBid);

        assert_eq!(resolve_food_votes(&mut state), Some(FoodVote::IncreaseMaxBid));
        assert_eq!(state.global_max_bid, 2);
        assert_eq!(state.global_min_bid, 1);
    }

    #[test]
    fn four_way_tie_changes_nothing() {
        let mut state = state();
        for vote in FoodVote::ALL {
            state.boards.food_votes.add(vote);
        }
        assert_eq!(resolve_food_votes(&mut state), None);
        assert_eq!(state.global_min_bid, 1);
        assert_eq!(state.global_max_bid, 1);
    }

    #[test]
    fn two_way_tie_changes_nothing() {
        let mut state = state();
        state.boards.food_votes.add(FoodVote::IncreaseMinBid);
        state.boards.food_votes.add(FoodVote::DecreaseMaxBid);
        assert_eq!(resolve_food_votes(&mut state), None);
    }

    #[test]
    fn no_votes_changes_nothing() {
        let mut state = state();
        assert_eq!(resolve_food_votes(&mut state), None);
    }

    #[test]
    fn bounds_never_go_negative() {
        let mut state = state();
        state.global_min_bid = 0;
        state.boards.food_votes.add(FoodVote::DecreaseMinBid);
        assert_eq!(resolve_food_votes(&mut state), Some(FoodVote::DecreaseMinBid));
        assert_eq!(state.global_min_bid, 0);
    }
}
