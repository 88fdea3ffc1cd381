//! Builds the per-player [`Observation`] from engine state.

use foodgame_types::{MarketSlot, OBSERVED_LISTINGS, Observation, PlayerId};

use crate::state::EngineState;

/// What `player` can currently see, or `None` for an unknown player.
///
/// Other players are listed in roster order with the observer left out.
/// The market section holds the first listings in market order.
pub fn observe(state: &EngineState, player: &PlayerId) -> Option<Observation> {
    let me = state.roster.get(player)?;

    let others = state.roster.iter().filter(|p| p.id != *player);
    let (other_scores, other_alive) = others.map(|p| (p.score, p.alive)).unzip();

    let market = state
        .boards
        .market
        .iter()
        .take(OBSERVED_LISTINGS)
        .map(|listing| MarketSlot {
            amount: listing.amount,
            start_bid: listing.start_bid,
        })
        .collect();

    Some(Observation {
        player: me.id.clone(),
        action_memory: me.action_memory.iter().collect(),
        food: me.food,
        energy: me.energy,
        coins: me.coins,
        skills: me.skills,
        alive: me.alive,
        market,
        food_requirement: state.food_requirement,
        day: state.day(),
        global_min_bid: state.global_min_bid,
        global_max_bid: state.global_max_bid,
        other_scores,
        other_alive,
        score: me.score,
        invalid_action: me.invalid_action,
    })
}

#[cfg(test)]
mod tests {
    use foodgame_agents::EconomyConfig;
    use foodgame_types::FIXED_OBSERVATION_WIDTH;

    use super::*;

    fn state_with(names: &[&str]) -> EngineState {
        let config = EconomyConfig::default();
        let mut state = EngineState::new(&config);
        for name in names {
            state.roster.add(Some(*name), &config);
        }
        state
    }

    #[test]
    fn unknown_player_has_no_observation() {
        let state = state_with(&["a"]);
        assert!(observe(&state, &PlayerId::named("zed")).is_none());
    }

    #[test]
    fn vector_width_grows_with_opponents() {
        let state = state_with(&["a", "b", "c"]);
        let obs = observe(&state, &PlayerId::named("b"));
        assert!(obs.is_some());
        let Some(obs) = obs else { return; };
        assert_eq!(
            obs.to_vector().len(),
            FIXED_OBSERVATION_WIDTH.saturating_add(4)
        );
        assert_eq!(obs.to_vector().len(), 239);
        assert_eq!(obs.action_memory.len(), 20);
    }

    #[test]
    fn others_are_in_roster_order_without_self() {
        let mut state = state_with(&["a", "b", "c"]);
        for (name, score) in [("a", 5), ("b", 7), ("c", 9)] {
            if let Some(p) = state.roster.get_mut(&PlayerId::named(name)) {
                p.score = score;
            }
        }
        if let Some(p) = state.roster.get_mut(&PlayerId::named("c")) {
            p.alive = false;
        }

        let obs = observe(&state, &PlayerId::named("b"));
        assert!(obs.is_some());
        let Some(obs) = obs else { return; };
        assert_eq!(obs.other_scores, vec![5, 9]);
        assert_eq!(obs.other_alive, vec![true, false]);
        assert_eq!(obs.score, 7);
    }

    #[test]
    fn market_slots_follow_listing_order() {
        let mut state = state_with(&["a", "b"]);
        let a = PlayerId::named("a");
        let b = PlayerId::named("b");
        assert!(state.boards.market.list(a, 3, 1).is_ok());
        assert!(state.boards.market.list(b, 4, 2).is_ok());

        let obs = observe(&state, &PlayerId::named("a"));
        assert!(obs.is_some());
        let Some(obs) = obs else { return; };
        let values = obs.market_values();
        assert_eq!(values.get(..4), Some(&[3, 1, 4, 2][..]));
        assert_eq!(values.len(), 200);
    }

    #[test]
    fn global_fields_are_copied() {
        let mut state = state_with(&["a"]);
        state.food_requirement = 3;
        state.global_max_bid = 4;
        let obs = observe(&state, &PlayerId::named("a"));
        assert!(obs.is_some());
        let Some(obs) = obs else { return; };
        assert_eq!(obs.food_requirement, 3);
        assert_eq!(obs.day, 1);
        assert_eq!(obs.global_max_bid, 4);
    }
}
