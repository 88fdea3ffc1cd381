//! Food market clearing.
//!
//! Runs once per turn after every queued action has executed. Bid buckets
//! are visited in ascending bid priority; inside a bucket, listings in the
//! order they were first bid on. For each listing the winning bid is the
//! first bid that beats the running maximum (starting at the listing's
//! start bid) while not exceeding the bidder's **food** holding.
//!
//! A sale moves `amount` food from seller to buyer and `price` coins from
//! buyer to seller, then closes the listing. Listings without a qualifying
//! bid stay open. Every pending bid is discarded after the pass.
//!
//! The listed food is taken from the seller at settlement, and a seller
//! who no longer holds it gets [`ListingOutcome::SellerShort`] with the
//! listing left open. This departs from selling unconditionally: a sale
//! never credits the buyer food the seller does not have, so clearing can
//! only move food and coins, never create them.
//!
//! Each listing yields a [`ListingOutcome`]. A failed listing does not
//! undo listings settled before it and does not stop the pass.

use foodgame_agents::{ActionError, ListingBids, Roster};
use foodgame_ledger::{Ledger, SaleParams};
use foodgame_types::{MarketId, PlayerId, Resource};
use tracing::{debug, warn};

use crate::state::EngineState;

/// What happened to one listing during clearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingOutcome {
    /// The listing sold and was closed.
    Sold {
        /// The listing.
        listing: MarketId,
        /// Player who listed the food.
        seller: PlayerId,
        /// Winning bidder.
        buyer: PlayerId,
        /// Food moved.
        amount: i64,
        /// Coins paid.
        price: i64,
    },
    /// No bid beat the start bid within the bidder's holding.
    NoQualifyingBid {
        /// The listing, still open.
        listing: MarketId,
    },
    /// The seller no longer holds the listed food; the listing stays open.
    SellerShort {
        /// The listing, still open.
        listing: MarketId,
        /// Food listed.
        amount: i64,
        /// Food the seller holds.
        available: i64,
    },
    /// The listing was closed by an earlier bucket.
    AlreadySold {
        /// The closed listing.
        listing: MarketId,
    },
    /// Settlement failed; nothing moved for this listing.
    Failed {
        /// The listing.
        listing: MarketId,
        /// Why settlement failed.
        reason: String,
    },
}

/// Per-listing outcomes of one clearing pass, in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketReport {
    /// One entry per (bucket, listing) visited.
    pub outcomes: Vec<ListingOutcome>,
}

impl MarketReport {
    /// Whether no listing failed.
    pub fn is_success(&self) -> bool {
        !self
            .outcomes
            .iter()
            .any(|o| matches!(o, ListingOutcome::Failed { .. }))
    }

    /// Number of listings sold.
    pub fn sold(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ListingOutcome::Sold { .. }))
            .count()
    }
}

/// Clear every pending food bid.
pub fn resolve_market(state: &mut EngineState) -> MarketReport {
    let day = state.day();
    let bids = std::mem::take(&mut state.boards.food_bids);
    let mut report = MarketReport::default();

    for (priority, bucket) in bids.buckets() {
        for listing_bids in bucket {
            let outcome = clear_listing(state, listing_bids, day);
            match &outcome {
                ListingOutcome::Failed { listing, reason } => {
                    warn!(day, priority, %listing, %reason, "Market settlement failed");
                }
                other => debug!(day, priority, outcome = ?other, "Listing cleared"),
            }
            report.outcomes.push(outcome);
        }
    }

    report
}

fn clear_listing(state: &mut EngineState, listing_bids: &ListingBids, day: u64) -> ListingOutcome {
    let id = listing_bids.market;
    let Some(listing) = state.boards.market.get(id).cloned() else {
        return ListingOutcome::AlreadySold { listing: id };
    };

    let Some((buyer, price)) = highest_qualifying_bid(&state.roster, listing_bids, listing.start_bid)
    else {
        return ListingOutcome::NoQualifyingBid { listing: id };
    };

    let available = state
        .roster
        .get(&listing.seller)
        .map_or(0, |seller| seller.food);
    if available < listing.amount {
        return ListingOutcome::SellerShort {
            listing: id,
            amount: listing.amount,
            available,
        };
    }

    if let Err(err) = settle(
        &mut state.roster,
        &listing.seller,
        &buyer,
        listing.amount,
        price,
    ) {
        return ListingOutcome::Failed {
            listing: id,
            reason: err.to_string(),
        };
    }
    state.boards.market.remove(id);
    record_sale(&mut state.ledger, day, &listing.seller, &buyer, listing.amount, price, id);

    ListingOutcome::Sold {
        listing: id,
        seller: listing.seller,
        buyer,
        amount: listing.amount,
        price,
    }
}

/// First bid beating the running maximum and covered by the bidder's food.
fn highest_qualifying_bid(
    roster: &Roster,
    listing_bids: &ListingBids,
    start_bid: i64,
) -> Option<(PlayerId, i64)> {
    let mut best = start_bid;
    let mut winner = None;
    for (bidder, bid) in &listing_bids.bids {
        let Some(food) = roster.get(bidder).map(|p| p.food) else {
            continue;
        };
        if best < *bid && *bid <= food {
            best = *bid;
            winner = Some(bidder);
        }
    }
    winner.map(|w| (w.clone(), best))
}

/// Move food and coins between seller and buyer. All-or-nothing.
fn settle(
    roster: &mut Roster,
    seller: &PlayerId,
    buyer: &PlayerId,
    amount: i64,
    price: i64,
) -> Result<(), ActionError> {
    if seller == buyer {
        return Ok(());
    }

    let s = roster
        .get(seller)
        .ok_or_else(|| ActionError::PlayerNotFound(seller.clone()))?;
    let seller_food = s
        .food
        .checked_sub(amount)
        .ok_or_else(|| ActionError::overflow("seller food"))?;
    let seller_coins = s
        .coins
        .checked_add(price)
        .ok_or_else(|| ActionError::overflow("seller coins"))?;

    let b = roster
        .get(buyer)
        .ok_or_else(|| ActionError::PlayerNotFound(buyer.clone()))?;
    let buyer_food = b
        .food
        .checked_add(amount)
        .ok_or_else(|| ActionError::overflow("buyer food"))?;
    let buyer_coins = b
        .coins
        .checked_sub(price)
        .ok_or_else(|| ActionError::overflow("buyer coins"))?;

    if let Some(s) = roster.get_mut(seller) {
        s.food = seller_food;
        s.coins = seller_coins;
    }
    if let Some(b) = roster.get_mut(buyer) {
        b.food = buyer_food;
        b.coins = buyer_coins;
    }
    Ok(())
}

fn record_sale(
    ledger: &mut Ledger,
    day: u64,
    seller: &PlayerId,
    buyer: &PlayerId,
    amount: i64,
    price: i64,
    listing: MarketId,
) {
    if seller == buyer {
        return;
    }
    let legs = [
        (Resource::Food, amount, seller, buyer),
        (Resource::Coins, price, buyer, seller),
    ];
    for (resource, quantity, from, to) in legs {
        if quantity == 0 {
            continue;
        }
        let result = ledger.record_market_sale(SaleParams {
            day,
            resource,
            quantity,
            from_player: from.clone(),
            to_player: to.clone(),
            listing,
        });
        if let Err(err) = result {
            warn!(day, %listing, ?resource, %err, "Failed to record market sale");
        }
    }
}

#[cfg(test)]
mod tests {
    use foodgame_agents::EconomyConfig;

    use super::*;

    fn pid(name: &str) -> PlayerId {
        PlayerId::named(name)
    }

    fn state_with(players: &[(&str, i64, i64)]) -> EngineState {
        let mut state = EngineState::new(&EconomyConfig::default());
        for (name, food, coins) in players {
            let config = EconomyConfig {
                starting_food: *food,
                starting_coins: *coins,
                ..EconomyConfig::default()
            };
            state.roster.add(Some(*name), &config);
        }
        state
    }

    fn holdings(state: &EngineState, name: &str) -> (i64, i64) {
        state
            .roster
            .get(&pid(name))
            .map_or((0, 0), |p| (p.food, p.coins))
    }

    #[test]
    fn single_listing_sells_to_qualifying_bidder() {
        let mut state = state_with(&[("a", 10, 0), ("b", 6, 6)]);
        let Ok(id) = state.boards.market.list(pid("a"), 10, 5) else {
            return;
        };
        state.boards.food_bids.place(1, id, pid("b"), 6);

        let report = resolve_market(&mut state);

        assert!(report.is_success());
        assert_eq!(report.sold(), 1);
        assert_eq!(holdings(&state, "a"), (0, 6));
        assert_eq!(holdings(&state, "b"), (16, 0));
        assert!(state.boards.market.is_empty());
        assert!(state.boards.food_bids.is_empty());
    }

    #[test]
    fn bid_must_beat_start_bid_and_fit_food() {
        let mut state = state_with(&[("a", 10, 0), ("b", 3, 50), ("c", 20, 0)]);
        let Ok(id) = state.boards.market.list(pid("a"), 2, 5) else {
            return;
        };
        // b: too much for its food; c: equal to the start bid
        state.boards.food_bids.place(1, id, pid("b"), 8);
        state.boards.food_bids.place(1, id, pid("c"), 5);

        let report = resolve_market(&mut state);

        assert_eq!(
            report.outcomes,
            vec![ListingOutcome::NoQualifyingBid { listing: id }]
        );
        assert_eq!(state.boards.market.len(), 1);
        assert!(state.boards.food_bids.is_empty());
    }

    #[test]
    fn highest_bid_wins_and_may_overdraw_coins() {
        let mut state = state_with(&[("a", 10, 0), ("b", 20, 1), ("c", 20, 0)]);
        let Ok(id) = state.boards.market.list(pid("a"), 4, 1) else {
            return;
        };
        state.boards.food_bids.place(1, id, pid("b"), 7);
        state.boards.food_bids.place(1, id, pid("c"), 3);

        let _ = resolve_market(&mut state);

        assert_eq!(holdings(&state, "b"), (24, -6));
        assert_eq!(holdings(&state, "c"), (20, 0));
        assert_eq!(holdings(&state, "a"), (6, 7));
    }

    #[test]
    fn later_bucket_sees_listing_as_sold() {
        let mut state = state_with(&[("a", 10, 0), ("b", 20, 0), ("c", 20, 0)]);
        let Ok(id) = state.boards.market.list(pid("a"), 1, 1) else {
            return;
        };
        state.boards.food_bids.place(9, id, pid("c"), 9);
        state.boards.food_bids.place(2, id, pid("b"), 2);

        let report = resolve_market(&mut state);

        assert!(matches!(
            report.outcomes.first(),
            Some(ListingOutcome::Sold { buyer, .. }) if *buyer == pid("b")
        ));
        assert_eq!(
            report.outcomes.get(1),
            Some(&ListingOutcome::AlreadySold { listing: id })
        );
    }

    #[test]
    fn seller_short_keeps_listing() {
        let mut state = state_with(&[("a", 10, 0), ("b", 20, 0)]);
        let Ok(id) = state.boards.market.list(pid("a"), 8, 1) else {
            return;
        };
        if let Some(a) = state.roster.get_mut(&pid("a")) {
            a.food = 3;
        }
        state.boards.food_bids.place(1, id, pid("b"), 2);

        let report = resolve_market(&mut state);

        assert_eq!(
            report.outcomes,
            vec![ListingOutcome::SellerShort {
                listing: id,
                amount: 8,
                available: 3,
            }]
        );
        assert!(state.boards.market.contains(id));
    }

    #[test]
    fn failed_listing_keeps_earlier_sales() {
        let mut state = state_with(&[("a", 10, 0), ("b", 20, 5), ("c", 20, 0)]);
        if let Some(c) = state.roster.get_mut(&pid("c")) {
            c.coins = i64::MIN;
        }
        let (Ok(first), Ok(second)) = (
            state.boards.market.list(pid("a"), 2, 1),
            state.boards.market.list(pid("a"), 3, 1),
        ) else {
            return;
        };
        state.boards.food_bids.place(1, first, pid("b"), 4);
        // paying anything from i64::MIN coins overflows
        state.boards.food_bids.place(2, second, pid("c"), 2);

        let report = resolve_market(&mut state);

        assert!(!report.is_success());
        assert_eq!(report.sold(), 1);
        assert!(matches!(
            report.outcomes.first(),
            Some(ListingOutcome::Sold { listing, .. }) if *listing == first
        ));
        assert!(matches!(
            report.outcomes.get(1),
            Some(ListingOutcome::Failed { listing, .. }) if *listing == second
        ));
        assert_eq!(holdings(&state, "a"), (8, 4));
        assert_eq!(holdings(&state, "b"), (22, 1));
        assert_eq!(holdings(&state, "c"), (20, i64::MIN));
        assert!(!state.boards.market.contains(first));
        assert!(state.boards.market.contains(second));
        assert!(state.boards.food_bids.is_empty());
    }

    #[test]
    fn clearing_conserves_food_and_coins() {
        let mut state = state_with(&[("a", 10, 5), ("b", 20, 9), ("c", 15, 2)]);
        let before = state.roster.totals();
        let mark = state.ledger.len();
        let listed = [
            state.boards.market.list(pid("a"), 3, 1),
            state.boards.market.list(pid("c"), 5, 1),
        ];
        for (n, listing) in listed.iter().enumerate() {
            let Ok(id) = listing else {
                return;
            };
            let priority = i64::try_from(n).unwrap_or(0);
            state.boards.food_bids.place(priority, *id, pid("b"), 4);
        }

        let report = resolve_market(&mut state);
        let after = state.roster.totals();

        assert_eq!(report.sold(), 2);
        assert_eq!(before, after);
        assert!(
            state
                .ledger
                .reconcile_since(mark, state.day(), &before, &after)
                .is_balanced()
        );
        assert!(state.ledger.verify_conservation(state.day()).is_balanced());
    }
}
