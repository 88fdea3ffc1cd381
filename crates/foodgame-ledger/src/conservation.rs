//! Conservation law verification for the ledger.
//!
//! Two checks are provided:
//!
//! - [`verify_conservation`]: internal (player to player) movements must
//!   balance per resource. Every well-formed `MarketSale` entry adds its
//!   quantity to both sides, so this only fails on corrupted entries
//!   (e.g. a sale missing one of its players).
//! - [`reconcile`]: the observed change in total holdings across a window
//!   must equal the net source/sink flow the ledger recorded for it. This
//!   is what catches a market clearing that credits a buyer without
//!   debiting the seller.

use std::collections::{BTreeMap, BTreeSet};

use foodgame_types::{EntityType, LedgerEntry, LedgerEntryType, Resource};

use crate::LedgerAnomaly;

/// The result of a conservation check for a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConservationResult {
    /// The ledger is balanced.
    Balanced,
    /// One or more resources have mismatched flows.
    Anomaly(LedgerAnomaly),
}

impl ConservationResult {
    /// Whether the check passed.
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// Returns `true` if the entry type moves resources between players.
const fn is_internal(entry_type: LedgerEntryType) -> bool {
    matches!(entry_type, LedgerEntryType::MarketSale)
}

/// Signed contribution of an entry to the economy-wide total.
///
/// Sources are positive, sinks negative, internal movements zero.
pub const fn signed_flow(entry: &LedgerEntry) -> i64 {
    match entry.entry_type {
        LedgerEntryType::Production | LedgerEntryType::AuctionPayout => entry.quantity,
        LedgerEntryType::EnergySpend
        | LedgerEntryType::Upkeep
        | LedgerEntryType::SkillPurchase => entry.quantity.saturating_neg(),
        LedgerEntryType::MarketSale => 0,
    }
}

/// Verify that internal movements balance for every resource on `day`.
///
/// A credit is counted when the destination is a player, a debit when the
/// source is a player.
pub fn verify_conservation(day: u64, entries: &[LedgerEntry]) -> ConservationResult {
    let mut internal_credit: BTreeMap<Resource, i64> = BTreeMap::new();
    let mut internal_debit: BTreeMap<Resource, i64> = BTreeMap::new();

    for entry in entries {
        if entry.day != day || !is_internal(entry.entry_type) {
            continue;
        }

        if entry.to_entity_type == Some(EntityType::Player) && entry.to_entity.is_some() {
            let c = internal_credit.entry(entry.resource).or_insert(0);
            *c = match c.checked_add(entry.quantity) {
                Some(val) => val,
                None => return overflow_anomaly(day, entry.resource),
            };
        }

        if entry.from_entity_type == Some(EntityType::Player) && entry.from_entity.is_some() {
            let d = internal_debit.entry(entry.resource).or_insert(0);
            *d = match d.checked_add(entry.quantity) {
                Some(val) => val,
                None => return overflow_anomaly(day, entry.resource),
            };
        }
    }

    let all_resources: BTreeSet<Resource> = internal_credit
        .keys()
        .chain(internal_debit.keys())
        .copied()
        .collect();

    let mut imbalances: BTreeMap<Resource, (i64, i64)> = BTreeMap::new();
    for resource in &all_resources {
        let total_credit = internal_credit.get(resource).copied().unwrap_or(0);
        let total_debit = internal_debit.get(resource).copied().unwrap_or(0);
        if total_credit != total_debit {
            imbalances.insert(*resource, (total_debit, total_credit));
        }
    }

    if imbalances.is_empty() {
        ConservationResult::Balanced
    } else {
        let count = imbalances.len();
        ConservationResult::Anomaly(LedgerAnomaly {
            day,
            imbalances,
            message: format!(
                "LEDGER_ANOMALY on day {day}: internal transfers unbalanced for {count} resource(s)",
            ),
        })
    }
}

/// Sum the signed flows of `entries` per resource.
pub fn net_flow<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> BTreeMap<Resource, i64> {
    let mut flows: BTreeMap<Resource, i64> = BTreeMap::new();
    for entry in entries {
        let delta = signed_flow(entry);
        if delta == 0 {
            continue;
        }
        let v = flows.entry(entry.resource).or_insert(0);
        *v = v.saturating_add(delta);
    }
    flows
}

/// Check that holdings moved exactly as the recorded flows say.
///
/// `before` and `after` are economy-wide totals per resource; a missing key
/// counts as zero.
pub fn reconcile(
    day: u64,
    flows: &BTreeMap<Resource, i64>,
    before: &BTreeMap<Resource, i64>,
    after: &BTreeMap<Resource, i64>,
) -> ConservationResult {
    let mut imbalances: BTreeMap<Resource, (i64, i64)> = BTreeMap::new();

    for resource in [Resource::Food, Resource::Energy, Resource::Coins] {
        let expected = flows.get(&resource).copied().unwrap_or(0);
        let start = before.get(&resource).copied().unwrap_or(0);
        let end = after.get(&resource).copied().unwrap_or(0);
        let Some(observed) = end.checked_sub(start) else {
            return overflow_anomaly(day, resource);
        };
        if observed != expected {
            imbalances.insert(resource, (expected, observed));
        }
    }

    if imbalances.is_empty() {
        ConservationResult::Balanced
    } else {
        let count = imbalances.len();
        tracing::warn!(day, count, "holdings diverged from recorded flows");
        ConservationResult::Anomaly(LedgerAnomaly {
            day,
            imbalances,
            message: format!(
                "LEDGER_ANOMALY on day {day}: holdings diverged from ledger for {count} resource(s)",
            ),
        })
    }
}

/// Construct an anomaly result for arithmetic overflow during summation.
fn overflow_anomaly(day: u64, resource: Resource) -> ConservationResult {
    let mut imbalances = BTreeMap::new();
    imbalances.insert(resource, (0, 0));
    ConservationResult::Anomaly(LedgerAnomaly {
        day,
        imbalances,
        message: format!(
            "LEDGER_ANOMALY on day {day}: arithmetic overflow while summing {resource:?}",
        ),
    })
}
