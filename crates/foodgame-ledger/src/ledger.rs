//! The ledger: an append-only log of all resource transfers in a game.
//!
//! # Design
//!
//! - **Append-only** within a game: entries are never modified; [`Ledger::clear`]
//!   drops everything when the game is reset.
//! - **Typed endpoints**: every entry names a player on each player side.
//! - **Conservation**: player-to-player flows balance per day, and holdings
//!   reconcile with source/sink flows over any window.

use std::collections::BTreeMap;

use foodgame_types::{LedgerEntry, LedgerEntryType, MarketId, PlayerId, Resource};

use crate::conservation::{self, ConservationResult};
use crate::{LedgerError, TransactionBuilder};

// ---------------------------------------------------------------------------
// Transfer parameters
// ---------------------------------------------------------------------------

/// Parameters for recording one side of a market sale.
pub struct SaleParams {
    /// The day of the sale.
    pub day: u64,
    /// Food for the listed amount, coins for the price.
    pub resource: Resource,
    /// Quantity moved.
    pub quantity: i64,
    /// Player giving up the resource.
    pub from_player: PlayerId,
    /// Player receiving the resource.
    pub to_player: PlayerId,
    /// The listing that was sold.
    pub listing: MarketId,
}

/// Parameters for recording a general ledger transfer.
///
/// `None` on a side means the world (as source) or the void (as sink).
pub struct TransferParams {
    /// The day number.
    pub day: u64,
    /// The category of transfer.
    pub entry_type: LedgerEntryType,
    /// The resource being transferred.
    pub resource: Resource,
    /// Quantity transferred.
    pub quantity: i64,
    /// Source player, or `None` for the world.
    pub from_player: Option<PlayerId>,
    /// Destination player, or `None` for the void.
    pub to_player: Option<PlayerId>,
    /// Human-readable reason.
    pub reason: String,
    /// Optional related listing.
    pub reference_id: Option<MarketId>,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The ledger tracking all resource transfers in one game.
#[derive(Debug, Default)]
pub struct Ledger {
    /// All entries, in insertion order.
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Create a new empty ledger.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Return the number of entries in the ledger.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return whether the ledger has no entries.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append a pre-built [`LedgerEntry`] to the ledger.
    pub fn append(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    /// Record a resource transfer.
    ///
    /// This is the general-purpose recording method. It builds and validates
    /// a [`LedgerEntry`] via the [`TransactionBuilder`] and appends it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_transfer(
        &mut self,
        params: TransferParams,
    ) -> Result<&LedgerEntry, LedgerError> {
        let mut builder = TransactionBuilder::new(params.day, params.entry_type, params.resource)
            .quantity(params.quantity)
            .reason(params.reason);

        builder = match params.from_player {
            Some(player) => builder.from_player(player),
            None => builder.from_world(),
        };
        builder = match params.to_player {
            Some(player) => builder.to_player(player),
            None => builder.to_void(),
        };
        if let Some(ref_id) = params.reference_id {
            builder = builder.reference_id(ref_id);
        }

        let entry = builder.build()?;
        self.entries.push(entry);

        self.entries.last().ok_or(LedgerError::InternalError(
            "failed to retrieve entry after append",
        ))
    }

    /// Record energy spent on a conversion (player to void).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_energy_spend(
        &mut self,
        day: u64,
        quantity: i64,
        player: &PlayerId,
        reason: &str,
    ) -> Result<&LedgerEntry, LedgerError> {
        self.record_transfer(TransferParams {
            day,
            entry_type: LedgerEntryType::EnergySpend,
            resource: Resource::Energy,
            quantity,
            from_player: Some(player.clone()),
            to_player: None,
            reason: reason.to_owned(),
            reference_id: None,
        })
    }

    /// Record food or coins produced by a conversion (world to player).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_production(
        &mut self,
        day: u64,
        resource: Resource,
        quantity: i64,
        player: &PlayerId,
    ) -> Result<&LedgerEntry, LedgerError> {
        self.record_transfer(TransferParams {
            day,
            entry_type: LedgerEntryType::Production,
            resource,
            quantity,
            from_player: None,
            to_player: Some(player.clone()),
            reason: "PRODUCTION".to_owned(),
            reference_id: None,
        })
    }

    /// Record food consumed by the food requirement (player to void).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_upkeep(
        &mut self,
        day: u64,
        quantity: i64,
        player: &PlayerId,
    ) -> Result<&LedgerEntry, LedgerError> {
        self.record_transfer(TransferParams {
            day,
            entry_type: LedgerEntryType::Upkeep,
            resource: Resource::Food,
            quantity,
            from_player: Some(player.clone()),
            to_player: None,
            reason: "UPKEEP".to_owned(),
            reference_id: None,
        })
    }

    /// Record one side of a market sale (player to player).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_market_sale(&mut self, params: SaleParams) -> Result<&LedgerEntry, LedgerError> {
        self.record_transfer(TransferParams {
            day: params.day,
            entry_type: LedgerEntryType::MarketSale,
            resource: params.resource,
            quantity: params.quantity,
            from_player: Some(params.from_player),
            to_player: Some(params.to_player),
            reason: "MARKET_SALE".to_owned(),
            reference_id: Some(params.listing),
        })
    }

    /// Record coins paid for a skill level (player to void).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_skill_purchase(
        &mut self,
        day: u64,
        quantity: i64,
        player: &PlayerId,
    ) -> Result<&LedgerEntry, LedgerError> {
        self.record_transfer(TransferParams {
            day,
            entry_type: LedgerEntryType::SkillPurchase,
            resource: Resource::Coins,
            quantity,
            from_player: Some(player.clone()),
            to_player: None,
            reason: "SKILL_PURCHASE".to_owned(),
            reference_id: None,
        })
    }

    /// Record a skill-auction payout share (world to player).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if the entry fails validation.
    pub fn record_auction_payout(
        &mut self,
        day: u64,
        quantity: i64,
        player: &PlayerId,
    ) -> Result<&LedgerEntry, LedgerError> {
        self.record_transfer(TransferParams {
            day,
            entry_type: LedgerEntryType::AuctionPayout,
            resource: Resource::Coins,
            quantity,
            from_player: None,
            to_player: Some(player.clone()),
            reason: "AUCTION_PAYOUT".to_owned(),
            reference_id: None,
        })
    }

    /// Verify that player-to-player flows balance on a given day.
    pub fn verify_conservation(&self, day: u64) -> ConservationResult {
        conservation::verify_conservation(day, &self.entries)
    }

    /// Reconcile holdings against the flows recorded since `mark`.
    ///
    /// `mark` is a previous value of [`Ledger::len`].
    pub fn reconcile_since(
        &self,
        mark: usize,
        day: u64,
        before: &BTreeMap<Resource, i64>,
        after: &BTreeMap<Resource, i64>,
    ) -> ConservationResult {
        let flows = self.net_flow_since(mark);
        conservation::reconcile(day, &flows, before, after)
    }

    /// Return all entries for a given day.
    pub fn entries_for_day(&self, day: u64) -> Vec<&LedgerEntry> {
        self.entries.iter().filter(|e| e.day == day).collect()
    }

    /// Return all entries, in insertion order.
    pub fn all_entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Calculate the net balance for a specific player and resource.
    ///
    /// Positive balance means the player has received more than it has sent.
    pub fn entity_balance(&self, player: &PlayerId, resource: Resource) -> i64 {
        let mut balance: i64 = 0;

        for entry in &self.entries {
            if entry.resource != resource {
                continue;
            }
            if entry.to_entity.as_ref() == Some(player) {
                balance = balance.saturating_add(entry.quantity);
            }
            if entry.from_entity.as_ref() == Some(player) {
                balance = balance.saturating_sub(entry.quantity);
            }
        }

        balance
    }

    /// Net economy-wide flow per resource on a given day.
    ///
    /// Positive means more was produced than spent.
    pub fn net_flow_for_day(&self, day: u64) -> BTreeMap<Resource, i64> {
        conservation::net_flow(self.entries.iter().filter(|e| e.day == day))
    }

    /// Net economy-wide flow per resource over entries appended after `mark`.
    pub fn net_flow_since(&self, mark: usize) -> BTreeMap<Resource, i64> {
        conservation::net_flow(self.entries.iter().skip(mark))
    }
}
