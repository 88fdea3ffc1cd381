//! The rotating skill auction.
//!
//! One skill is on auction at a time. After the market clears, the first
//! bid that beats the running maximum (starting at 0) and is covered by the
//! bidder's coins wins: the winner pays the bid and gains one level in the
//! auctioned skill.
//!
//! The winning bid is then paid out to every player holding a positive
//! `auction_skill` level who did not bid this cycle, pro rata by level:
//! `share = floor(bid * level / total_level)`. The rounding remainder
//! leaves the economy.
//!
//! Finally the skill with the strictly highest vote count becomes the next
//! one on auction (earliest skill on ties; unchanged without votes), and all
//! skill bids are cleared.

use foodgame_agents::skills;
use foodgame_types::{PlayerId, Skill};
use tracing::{debug, warn};

use crate::state::EngineState;

/// Winner of one skill auction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionWin {
    /// Winning bidder.
    pub player: PlayerId,
    /// Coins paid.
    pub bid: i64,
    /// The winner's new level in the auctioned skill.
    pub new_level: u32,
}

/// Result of one skill-auction round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillAuctionReport {
    /// The skill that was on auction.
    pub skill: Skill,
    /// The winner, if any bid qualified.
    pub winner: Option<AuctionWin>,
    /// Coins credited to auction-skill holders.
    pub payouts: Vec<(PlayerId, i64)>,
    /// The skill on auction next turn.
    pub next_skill: Skill,
}

/// Run the skill auction and pick the next auctioned skill.
pub fn resolve_skill_auction(state: &mut EngineState) -> SkillAuctionReport {
    let day = state.day();
    let skill = state.skill_auction;

    let winner = award(state, skill, day);
    let payouts = winner
        .as_ref()
        .map(|win| pay_out(state, win.bid, day))
        .unwrap_or_default();

    if let Some(next) = state.boards.skill_votes.earliest_leader() {
        state.skill_auction = next;
    }
    state.boards.skill_bids.clear();

    SkillAuctionReport {
        skill,
        winner,
        payouts,
        next_skill: state.skill_auction,
    }
}

fn award(state: &mut EngineState, skill: Skill, day: u64) -> Option<AuctionWin> {
    let mut best: i64 = 0;
    let mut leader: Option<&PlayerId> = None;
    for (bidder, bid) in state.boards.skill_bids.iter() {
        let Some(coins) = state.roster.get(bidder).map(|p| p.coins) else {
            continue;
        };
        if best < *bid && *bid <= coins {
            best = *bid;
            leader = Some(bidder);
        }
    }
    let player = leader?.clone();

    let winner = state.roster.get_mut(&player)?;
    let Some(coins) = winner.coins.checked_sub(best) else {
        warn!(day, %player, bid = best, "Skill auction payment overflowed");
        return None;
    };
    let new_level = match skills::raise_skill(&mut winner.skills, skill) {
        Ok(level) => level,
        Err(err) => {
            warn!(day, %player, %err, "Skill auction level-up failed");
            return None;
        }
    };
    winner.coins = coins;

    if let Err(err) = state.ledger.record_skill_purchase(day, best, &player) {
        warn!(day, %player, %err, "Failed to record skill purchase");
    }
    debug!(day, %player, ?skill, bid = best, new_level, "Skill auction won");

    Some(AuctionWin {
        player,
        bid: best,
        new_level,
    })
}

fn pay_out(state: &mut EngineState, bid: i64, day: u64) -> Vec<(PlayerId, i64)> {
    let holders: Vec<(PlayerId, i64)> = state
        .roster
        .iter()
        .filter(|p| p.skills.auction > 0 && !state.boards.skill_bids.has_bid(&p.id))
        .map(|p| (p.id.clone(), i64::from(p.skills.auction)))
        .collect();
    let total = holders
        .iter()
        .map(|(_, level)| *level)
        .fold(0_i64, i64::saturating_add);

    let mut payouts = Vec::with_capacity(holders.len());
    for (player, level) in holders {
        let Some(share) = bid
            .checked_mul(level)
            .and_then(|v| v.checked_div(total))
        else {
            warn!(day, %player, "Auction payout overflowed");
            continue;
        };
        if share <= 0 {
            continue;
        }
        let Some(holder) = state.roster.get_mut(&player) else {
            continue;
        };
        let Some(coins) = holder.coins.checked_add(share) else {
            warn!(day, %player, share, "Auction payout overflowed");
            continue;
        };
        holder.coins = coins;
        if let Err(err) = state.ledger.record_auction_payout(day, share, &player) {
            warn!(day, %player, %err, "Failed to record auction payout");
        }
        payouts.push((player, share));
    }
    payouts
}
