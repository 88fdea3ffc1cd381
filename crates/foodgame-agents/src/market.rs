//! The food market board and the pending food bids.
//!
//! Listings are kept in listing order and capped at [`MAX_MARKET_LISTINGS`].
//! Bids are grouped into priority buckets (ascending), then by listing in
//! first-bid order, then by bidder in first-bid order. A repeated bid from
//! the same bidder on the same listing in the same bucket overwrites the
//! amount without moving its position.

use std::collections::BTreeMap;

use foodgame_types::{MarketId, MarketListing, PlayerId};

use crate::error::ActionError;

/// Maximum number of concurrent listings.
pub const MAX_MARKET_LISTINGS: usize = 100;

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// Open food listings, in listing order.
#[derive(Debug, Clone, Default)]
pub struct FoodMarket {
    listings: Vec<MarketListing>,
}

impl FoodMarket {
    /// Create an empty market.
    pub const fn new() -> Self {
        Self {
            listings: Vec::new(),
        }
    }

    /// Open a new listing.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::MarketFull`] at capacity.
    pub fn list(
        &mut self,
        seller: PlayerId,
        amount: i64,
        start_bid: i64,
    ) -> Result<MarketId, ActionError> {
        if self.is_full() {
            return Err(ActionError::MarketFull {
                capacity: MAX_MARKET_LISTINGS,
            });
        }
        let id = MarketId::new();
        self.listings.push(MarketListing {
            id,
            seller,
            amount,
            start_bid,
        });
        Ok(id)
    }

    /// Number of open listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether there are no open listings.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Whether another listing would exceed capacity.
    pub fn is_full(&self) -> bool {
        self.listings.len() >= MAX_MARKET_LISTINGS
    }

    /// Look a listing up by id.
    pub fn get(&self, id: MarketId) -> Option<&MarketListing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Whether a listing with this id is open.
    pub fn contains(&self, id: MarketId) -> bool {
        self.get(id).is_some()
    }

    /// The listing at a position in listing order.
    pub fn at(&self, position: usize) -> Option<&MarketListing> {
        self.listings.get(position)
    }

    /// Close a listing, returning it.
    pub fn remove(&mut self, id: MarketId) -> Option<MarketListing> {
        let position = self.listings.iter().position(|l| l.id == id)?;
        Some(self.listings.remove(position))
    }

    /// Listings in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &MarketListing> {
        self.listings.iter()
    }

    /// Close every listing.
    pub fn clear(&mut self) {
        self.listings.clear();
    }
}

// ---------------------------------------------------------------------------
// Bids
// ---------------------------------------------------------------------------

/// Bids on one listing within one priority bucket, in first-bid order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingBids {
    /// The listing bid on.
    pub market: MarketId,
    /// `(bidder, bid)` pairs in first-bid order.
    pub bids: Vec<(PlayerId, i64)>,
}

/// Pending food bids, bucketed by priority.
#[derive(Debug, Clone, Default)]
pub struct FoodBids {
    buckets: BTreeMap<i64, Vec<ListingBids>>,
}

impl FoodBids {
    /// Create an empty bid book.
    pub const fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    /// Record a bid, overwriting an earlier bid by the same bidder on the
    /// same listing in the same bucket.
    pub fn place(&mut self, priority: i64, market: MarketId, bidder: PlayerId, bid: i64) {
        let bucket = self.buckets.entry(priority).or_default();
        let listing = match bucket.iter().position(|l| l.market == market) {
            Some(pos) => bucket.get_mut(pos),
            None => {
                bucket.push(ListingBids {
                    market,
                    bids: Vec::new(),
                });
                bucket.last_mut()
            }
        };
        let Some(listing) = listing else {
            return;
        };
        match listing.bids.iter_mut().find(|(p, _)| *p == bidder) {
            Some(existing) => existing.1 = bid,
            None => listing.bids.push((bidder, bid)),
        }
    }

    /// Buckets in ascending priority order.
    pub fn buckets(&self) -> impl Iterator<Item = (i64, &[ListingBids])> {
        self.buckets.iter().map(|(p, l)| (*p, l.as_slice()))
    }

    /// The bid a bidder has on a listing in a bucket, if any.
    pub fn bid_of(&self, priority: i64, market: MarketId, bidder: &PlayerId) -> Option<i64> {
        self.buckets
            .get(&priority)?
            .iter()
            .find(|l| l.market == market)?
            .bids
            .iter()
            .find(|(p, _)| p == bidder)
            .map(|(_, b)| *b)
    }

    /// Total number of pending bids.
    pub fn len(&self) -> usize {
        self.buckets
            .values()
            .flat_map(|b| b.iter())
            .map(|l| l.bids.len())
            .sum()
    }

    /// Whether no bids are pending.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Drop every pending bid.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
