//! Pending bids for the current skill auction.
//!
//! One bid per player per auction cycle; a repeated bid overwrites the
//! amount and keeps the original position.

use foodgame_types::PlayerId;

/// Skill-auction bids in first-bid order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillBids {
    bids: Vec<(PlayerId, i64)>,
}

impl SkillBids {
    /// Create an empty bid list.
    pub const fn new() -> Self {
        Self { bids: Vec::new() }
    }

    /// Record or overwrite a player's bid.
    pub fn place(&mut self, bidder: PlayerId, bid: i64) {
        match self.bids.iter_mut().find(|(p, _)| *p == bidder) {
            Some(existing) => existing.1 = bid,
            None => self.bids.push((bidder, bid)),
        }
    }

    /// Whether this player has bid in the current cycle.
    pub fn has_bid(&self, player: &PlayerId) -> bool {
        self.bids.iter().any(|(p, _)| p == player)
    }

    /// The player's current bid, if any.
    pub fn bid_of(&self, player: &PlayerId) -> Option<i64> {
        self.bids.iter().find(|(p, _)| p == player).map(|(_, b)| *b)
    }

    /// `(bidder, bid)` pairs in first-bid order.
    pub fn iter(&self) -> impl Iterator<Item = &(PlayerId, i64)> {
        self.bids.iter()
    }

    /// Number of bids.
    pub fn len(&self) -> usize {
        self.bids.len()
    }

    /// Whether no bids are pending.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    /// Drop every bid.
    pub fn clear(&mut self) {
        self.bids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_bid_per_player() {
        let mut bids = SkillBids::new();
        bids.place(PlayerId::named("a"), 3);
        bids.place(PlayerId::named("b"), 5);
        bids.place(PlayerId::named("a"), 8);

        assert_eq!(bids.len(), 2);
        assert_eq!(bids.bid_of(&PlayerId::named("a")), Some(8));
        let order: Vec<&str> = bids.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn clear_forgets_bidders() {
        let mut bids = SkillBids::new();
        bids.place(PlayerId::named("a"), 1);
        bids.clear();
        assert!(!bids.has_bid(&PlayerId::named("a")));
        assert!(bids.is_empty());
    }
}
