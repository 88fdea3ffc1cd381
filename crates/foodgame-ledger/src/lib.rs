//! Transfer ledger and conservation checks for the food game economy.
//!
//! Every resource movement in a game is recorded in this ledger. Resources
//! enter the economy only through conversions and skill-auction payouts,
//! and leave it only through energy spending, upkeep and skill purchases.
//! Market sales move food and coins between players and must never change
//! the totals.
//!
//! # Architecture
//!
//! - [`ledger`] -- The [`Ledger`] struct: append-only log with recording methods.
//! - [`transaction`] -- The [`TransactionBuilder`] for validated entry construction.
//! - [`conservation`] -- Balance verification and reconciliation against holdings.
//!
//! # Conservation Law
//!
//! For every day D and every resource R:
//!
//! ```text
//! sum(credits for R in D) == sum(debits for R in D)   (player -> player flows)
//! after(R) - before(R)    == net_flow(R)              (reconciliation)
//! ```
//!
//! A violation produces a [`LedgerAnomaly`]. The ledger never panics; it
//! returns errors.
//!
//! Entry types and their expected entity pairs:
//!
//! | Type | From (debit) | To (credit) |
//! |------|-------------|-------------|
//! | `EnergySpend` | Player | Void |
//! | `Production` | World | Player |
//! | `Upkeep` | Player | Void |
//! | `MarketSale` | Player | Player |
//! | `SkillPurchase` | Player | Void |
//! | `AuctionPayout` | World | Player |
//!
//! # Usage
//!
//! ```
//! use foodgame_ledger::{Ledger, SaleParams};
//! use foodgame_ledger::conservation::ConservationResult;
//! use foodgame_types::{MarketId, PlayerId, Resource};
//!
//! let mut ledger = Ledger::new();
//! let seller = PlayerId::named("seller");
//! let buyer = PlayerId::named("buyer");
//!
//! ledger.record_production(1, Resource::Food, 10, &seller).ok();
//! ledger
//!     .record_market_sale(SaleParams {
//!         day: 1,
//!         resource: Resource::Food,
//!         quantity: 10,
//!         from_player: seller.clone(),
//!         to_player: buyer.clone(),
//!         listing: MarketId::new(),
//!     })
//!     .ok();
//!
//! assert_eq!(ledger.verify_conservation(1), ConservationResult::Balanced);
//! assert_eq!(ledger.entity_balance(&buyer, Resource::Food), 10);
//! ```

pub mod conservation;
pub mod ledger;
pub mod transaction;

// Re-export primary types at crate root.
pub use conservation::ConservationResult;
pub use ledger::{Ledger, SaleParams, TransferParams};
pub use transaction::TransactionBuilder;

use std::collections::BTreeMap;

use serde::Serialize;

use foodgame_types::{LedgerEntryType, Resource};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when recording ledger entries.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Quantity must be strictly positive.
    #[error("ledger entry quantity must be non-zero")]
    ZeroQuantity,

    /// Quantity must not be negative.
    #[error("ledger entry quantity must be positive, got {quantity}")]
    NegativeQuantity {
        /// The invalid quantity.
        quantity: i64,
    },

    /// A required field was not set on the builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The from/to entity types do not match the expected types for the
    /// entry type.
    #[error(
        "invalid entity type for {entry_type:?} {side}: expected {expected}, got {actual}"
    )]
    InvalidEntityType {
        /// The entry type being validated.
        entry_type: LedgerEntryType,
        /// Which side of the entry ("from" or "to").
        side: &'static str,
        /// The expected entity type.
        expected: String,
        /// The actual entity type.
        actual: String,
    },

    /// An internal error that should not occur in normal operation.
    #[error("internal ledger error: {0}")]
    InternalError(&'static str),
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A conservation law violation detected for one day.
///
/// `imbalances` maps each offending resource to the pair of totals that
/// failed to match: (debits, credits) for the balance check, or
/// (expected change, observed change) for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerAnomaly {
    /// The day on which the anomaly was detected.
    pub day: u64,
    /// Per-resource mismatch.
    pub imbalances: BTreeMap<Resource, (i64, i64)>,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for LedgerAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
