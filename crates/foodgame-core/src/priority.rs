//! Turn order for a batch of queued actions.
//!
//! Every player carries a [`TurnPriority`] raised by votes cast during
//! earlier turns. Players are visited in roster order; a player whose
//! priority collides with one already assigned is nudged by
//! [`TurnPriority::STEP`] in a direction drawn once per player until the
//! value is free. Higher priorities act first.
//!
//! Each priority is reset to zero as it is consumed, before any action of
//! the turn runs, so votes cast during a turn shape the next turn's order.

use std::collections::BTreeMap;

use foodgame_agents::Roster;
use foodgame_types::{PlayerId, TurnPriority};
use rand::Rng;

/// Compute the execution order and reset every player's priority.
///
/// The result is a permutation of the roster, highest priority first.
pub fn turn_order<R: Rng>(roster: &mut Roster, rng: &mut R) -> Vec<PlayerId> {
    let mut assigned: BTreeMap<TurnPriority, PlayerId> = BTreeMap::new();

    for player in roster.iter_mut() {
        let mut upward = rng.random_bool(0.5);
        let mut priority = player.turn_priority;
        while assigned.contains_key(&priority) {
            match priority.stepped(upward) {
                Some(next) => priority = next,
                None => upward = !upward,
            }
        }
        player.turn_priority = TurnPriority::zero();
        assigned.insert(priority, player.id.clone());
    }

    assigned.into_values().rev().collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use foodgame_agents::EconomyConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn roster(n: usize) -> Roster {
        let mut roster = Roster::new();
        let config = EconomyConfig::default();
        for i in 0..n {
            roster.add(Some(&format!("p{i}")), &config);
        }
        roster
    }

    #[test]
    fn equal_priorities_still_give_a_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let mut r = roster(10);
            let order = turn_order(&mut r, &mut rng);
            let unique: BTreeSet<_> = order.iter().collect();
            assert_eq!(order.len(), 10);
            assert_eq!(unique.len(), 10);
        }
    }

    #[test]
    fn voted_players_go_first() {
        let mut r = roster(4);
        let favourite = PlayerId::named("p2");
        if let Some(p) = r.get_mut(&favourite) {
            p.turn_priority = TurnPriority(TurnPriority::VOTE.saturating_mul(2));
        }
        let mut rng = StdRng::seed_from_u64(11);
        let order = turn_order(&mut r, &mut rng);
        assert_eq!(order.first(), Some(&favourite));
    }

    #[test]
    fn priorities_reset_after_ordering() {
        let mut r = roster(3);
        if let Some(p) = r.get_mut(&PlayerId::named("p0")) {
            p.turn_priority = TurnPriority(TurnPriority::VOTE);
        }
        let mut rng = StdRng::seed_from_u64(5);
        let _ = turn_order(&mut r, &mut rng);
        assert!(r.iter().all(|p| p.turn_priority == TurnPriority::zero()));
    }

    #[test]
    fn perturbation_keeps_whole_vote_gaps() {
        let mut r = roster(5);
        if let Some(p) = r.get_mut(&PlayerId::named("p4")) {
            p.turn_priority = TurnPriority(TurnPriority::VOTE);
        }
        let mut rng = StdRng::seed_from_u64(17);
        let order = turn_order(&mut r, &mut rng);
        assert_eq!(order.first(), Some(&PlayerId::named("p4")));
    }
}
